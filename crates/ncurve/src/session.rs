//! Session: the calls a front-end needs to drive one curve.
//!
//! Holds the curve and the explicit `SessionState` (unsaved changes, running)
//! that a menu loop reads between commands. All user-facing text is the
//! front-end's job; every failure comes back as a typed value.

use std::path::Path;

use crate::curve::{point, Curve, CurveMetrics, MetricsError, Point, RejectionReason};
use crate::io::{self, LoadError, SaveCfg, SaveError};

/// `true` when an operation changed the curve.
pub type ModifiedFlag = bool;

/// Program flags kept across commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// There are changes not yet saved to a file.
    pub modified: bool,
    /// The front-end loop should keep going.
    pub running: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            modified: false,
            running: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    curve: Curve,
    state: SessionState,
    save_cfg: SaveCfg,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_save_cfg(save_cfg: SaveCfg) -> Self {
        Self {
            save_cfg,
            ..Self::default()
        }
    }

    /// Replace the curve with the points of `path`.
    ///
    /// The whole file is read before anything is discarded, so a missing or
    /// unreadable path leaves the session untouched. On `PartialSequenceViolation`
    /// the points read before the offending line are kept (and count as a
    /// modification).
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ModifiedFlag, LoadError> {
        let path = path.as_ref();
        let text = io::read_source(path)?;
        self.curve.clear();
        self.state.modified = true;
        let outcome = io::read_points(text.as_bytes(), &mut self.curve)?;
        tracing::info!(
            path = %path.display(),
            accepted = outcome.accepted,
            stopped_at = ?outcome.stopped_at,
            "load"
        );
        Ok(true)
    }

    /// Append one typed-in point under the direction policy.
    pub fn add_point_interactive(&mut self, x: f64, y: f64) -> Result<ModifiedFlag, RejectionReason> {
        self.curve.push(point(x, y))?;
        self.state.modified = true;
        Ok(true)
    }

    /// Check whether `x` would be accepted as the next point, before asking for `y`.
    ///
    /// Direction depends only on X, so the Y used here is irrelevant.
    pub fn probe_x(&self, x: f64) -> Result<(), RejectionReason> {
        let seq = self.curve.points();
        crate::curve::policy::admit(seq.direction(), seq.tail(), point(x, 0.0)).map(|_| ())
    }

    pub fn clear(&mut self) {
        if !self.curve.is_empty() {
            self.state.modified = true;
        }
        self.curve.clear();
    }

    /// Translate the curve; a rejected offset changes nothing.
    pub fn shift(&mut self, dx: f64, dy: f64) -> Result<ModifiedFlag, RejectionReason> {
        self.curve.shift(dx, dy)?;
        let modified = !self.curve.is_empty();
        self.state.modified |= modified;
        tracing::debug!(dx, dy, "shift");
        Ok(modified)
    }

    pub fn metrics(&self) -> Result<&CurveMetrics, MetricsError> {
        self.curve.metrics()
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.curve.len()
    }

    #[inline]
    pub fn iterate(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.curve.iter()
    }

    #[inline]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Write the curve to a new file; clears the unsaved-changes flag on success.
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SaveError> {
        let path = path.as_ref();
        io::save_file(path, self.curve.iter(), self.save_cfg)?;
        self.state.modified = false;
        tracing::info!(path = %path.display(), points = self.curve.len(), "save");
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn request_exit(&mut self) {
        self.state.running = false;
    }

    pub fn cancel_exit(&mut self) {
        self.state.running = true;
    }
}

impl From<Curve> for Session {
    fn from(curve: Curve) -> Self {
        Self {
            curve,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn interactive_entry_sets_modified_and_reports_rejection() {
        let mut s = Session::new();
        assert!(!s.state().modified);
        assert_eq!(s.add_point_interactive(0.0, 0.0), Ok(true));
        assert_eq!(s.add_point_interactive(-1.0, 4.0), Ok(true));
        assert!(s.state().modified);
        assert!(matches!(
            s.add_point_interactive(0.5, 1.0),
            Err(RejectionReason::OutOfSequence { .. })
        ));
        assert_eq!(s.point_count(), 2);
        assert!(s.probe_x(-2.0).is_ok());
        assert!(s.probe_x(-1.0).is_err());
    }

    #[test]
    fn missing_file_leaves_session_untouched() {
        let dir = tempdir().unwrap();
        let mut s = Session::new();
        s.add_point_interactive(1.0, 1.0).unwrap();
        let r = s.load_from_file(dir.path().join("missing.txt"));
        assert!(matches!(r, Err(LoadError::FileNotFound(_))));
        assert_eq!(s.point_count(), 1);
    }

    #[test]
    fn unreadable_path_leaves_session_untouched() {
        let dir = tempdir().unwrap();
        let mut s = Session::new();
        s.add_point_interactive(0.0, 0.0).unwrap();
        s.add_point_interactive(1.0, 1.0).unwrap();
        let path = dir.path().join("saved.txt");
        s.save_to_file(&path).unwrap();
        assert!(!s.state().modified);
        // A directory exists but cannot be read as a point file.
        let r = s.load_from_file(dir.path());
        assert!(matches!(r, Err(LoadError::Io(_))));
        assert_eq!(s.point_count(), 2);
        assert!(!s.state().modified);
        assert!(s.metrics().is_ok());
    }

    #[test]
    fn rejected_shift_keeps_points_and_flags() {
        let mut s = Session::new();
        s.add_point_interactive(0.0, 0.0).unwrap();
        s.add_point_interactive(1.0, 1.0).unwrap();
        let dir = tempdir().unwrap();
        s.save_to_file(dir.path().join("a.txt")).unwrap();
        assert!(matches!(
            s.shift(f64::NAN, 0.0),
            Err(RejectionReason::NonFinite { .. })
        ));
        assert!(s.shift(1e20, 0.0).is_err());
        assert!(!s.state().modified);
        let pts: Vec<Point> = s.iterate().collect();
        assert_eq!(pts, vec![point(0.0, 0.0), point(1.0, 1.0)]);
        // Still accepts points after the rejected shifts.
        assert_eq!(s.add_point_interactive(2.0, 0.0), Ok(true));
    }

    #[test]
    fn empty_shift_is_not_a_modification() {
        let mut s = Session::new();
        assert_eq!(s.shift(1.0, 1.0), Ok(false));
        assert!(!s.state().modified);
    }

    #[test]
    fn load_replaces_previous_points() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.txt");
        std::fs::write(&path, "5 0\n4 1\n3 0\n").unwrap();
        let mut s = Session::new();
        s.add_point_interactive(0.0, 0.0).unwrap();
        s.add_point_interactive(1.0, 0.0).unwrap();
        assert_eq!(s.load_from_file(&path).unwrap(), true);
        let pts: Vec<Point> = s.iterate().collect();
        assert_eq!(pts, vec![point(5.0, 0.0), point(4.0, 1.0), point(3.0, 0.0)]);
        assert_eq!(s.metrics().unwrap().high, point(4.0, 1.0));
    }

    #[test]
    fn partial_load_keeps_prefix_and_marks_modified() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.txt");
        std::fs::write(&path, "0 0\n1 1\n0 2\n").unwrap();
        let mut s = Session::new();
        let r = s.load_from_file(&path);
        assert!(matches!(
            r,
            Err(LoadError::PartialSequenceViolation { accepted: 2, .. })
        ));
        assert_eq!(s.point_count(), 2);
        assert!(s.state().modified);
        assert!(s.metrics().is_ok());
    }

    #[test]
    fn save_clears_modified_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut s = Session::new();
        s.add_point_interactive(0.0, 1.0).unwrap();
        s.add_point_interactive(2.0, 3.0).unwrap();
        s.save_to_file(&path).unwrap();
        assert!(!s.state().modified);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0 1\n2 3\n");

        assert_eq!(s.shift(1.0, 1.0), Ok(true));
        assert!(s.state().modified);
        assert!(matches!(
            s.save_to_file(&path),
            Err(SaveError::FileAlreadyExists(_))
        ));
        assert!(s.state().modified);
    }

    #[test]
    fn clear_then_metrics_is_empty_error() {
        let mut s = Session::new();
        s.add_point_interactive(0.0, 1.0).unwrap();
        s.clear();
        assert_eq!(s.point_count(), 0);
        assert_eq!(s.metrics(), Err(MetricsError::EmptySequence));
    }

    #[test]
    fn exit_flags() {
        let mut s = Session::new();
        assert!(s.state().running);
        s.request_exit();
        assert!(!s.state().running);
        s.cancel_exit();
        assert!(s.state().running);
    }
}
