//! Point curves with a monotone-X insertion policy and cached metrics.
//!
//! Purpose
//! - `PointSequence` stores points in X order and rejects any point that breaks
//!   the direction fixed by the first two.
//! - `Curve` pairs a sequence with its `CurveMetrics` and recomputes them after
//!   every structural change (append, clear, shift). Nothing is patched
//!   incrementally; curves are small.
//!
//! Code cross-refs: `policy::admit`, `metrics::CurveMetrics::compute`

pub mod metrics;
pub mod policy;
mod sequence;
mod types;

pub use metrics::{segment_area, segment_length, CurveMetrics};
pub use sequence::PointSequence;
pub use types::{point, Direction, MetricsError, Point, RejectionReason};

/// A point sequence plus its derived statistics.
///
/// Invariants:
/// - `metrics` is `Some` iff the sequence is non-empty, and always matches it.
#[derive(Clone, Debug, Default)]
pub struct Curve {
    seq: PointSequence,
    metrics: Option<CurveMetrics>,
}

impl Curve {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one point; metrics are recomputed only if it was accepted.
    pub fn push(&mut self, p: Point) -> Result<(), RejectionReason> {
        self.seq.append(p)?;
        self.refresh();
        Ok(())
    }

    /// Append points in order until the first rejection.
    ///
    /// Accepted points are kept either way. `Ok(n)` is the number appended;
    /// `Err((n, reason))` reports how many were appended before `reason`.
    pub fn try_extend<I>(&mut self, points: I) -> Result<usize, (usize, RejectionReason)>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut accepted = 0usize;
        let mut outcome = Ok(());
        for p in points {
            if let Err(reason) = self.seq.append(p) {
                outcome = Err(reason);
                break;
            }
            accepted += 1;
        }
        if accepted > 0 {
            self.refresh();
        }
        outcome.map(|()| accepted).map_err(|r| (accepted, r))
    }

    pub fn clear(&mut self) {
        self.seq.clear();
        self.refresh();
    }

    /// Translate every point by `(dx, dy)`.
    ///
    /// Fails, leaving the curve unchanged, when the offset is non-finite or
    /// when f64 rounding would merge neighbouring X values. Length is
    /// translation invariant but everything is recomputed anyway.
    pub fn shift(&mut self, dx: f64, dy: f64) -> Result<(), RejectionReason> {
        self.seq.translate(dx, dy)?;
        self.refresh();
        Ok(())
    }

    /// Current metrics, or `EmptySequence` when there are no points.
    #[inline]
    pub fn metrics(&self) -> Result<&CurveMetrics, MetricsError> {
        self.metrics.as_ref().ok_or(MetricsError::EmptySequence)
    }

    #[inline]
    pub fn points(&self) -> &PointSequence {
        &self.seq
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.seq.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.seq.direction()
    }

    fn refresh(&mut self) {
        self.metrics = CurveMetrics::compute(self.seq.as_slice()).ok();
    }
}
