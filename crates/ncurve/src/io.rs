//! Flat point files: one `x y` pair per line, no header.
//!
//! Load policy
//! - Blank lines are skipped.
//! - The first line that is not exactly two floats ends the read quietly.
//! - The first point the direction policy rejects ends the read with
//!   `PartialSequenceViolation`; points read before it stay in the curve.
//!
//! Save policy
//! - Never overwrites (`create_new`), so the existence check cannot race.
//! - Default formatting is the shortest representation that round-trips, so a
//!   saved curve loads back bit-exact.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::curve::{point, Curve, Point, RejectionReason};

/// Output formatting for saved point files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveCfg {
    /// Fixed number of decimals; `None` writes the exact shortest form.
    pub precision: Option<usize>,
}

/// Result of a load that ran to the end of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Points appended to the curve.
    pub accepted: usize,
    /// 1-based line that stopped the read early because it was not two floats.
    pub stopped_at: Option<usize>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Line `line` broke the sequence; `accepted` points were kept.
    #[error("line {line}: {reason} ({accepted} points kept)")]
    PartialSequenceViolation {
        line: usize,
        accepted: usize,
        reason: RejectionReason,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("file already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parse one `x y` line. Anything other than exactly two floats is `None`.
pub fn parse_line(line: &str) -> Option<Point> {
    let mut toks = line.split_whitespace();
    let x = toks.next()?.parse::<f64>().ok()?;
    let y = toks.next()?.parse::<f64>().ok()?;
    if toks.next().is_some() {
        return None;
    }
    Some(point(x, y))
}

/// Append points read from `reader` to `curve` (see module docs for stop rules).
pub fn read_points<R: BufRead>(reader: R, curve: &mut Curve) -> Result<LoadOutcome, LoadError> {
    let mut accepted = 0usize;
    for (k, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = k + 1;
        if line.trim().is_empty() {
            continue;
        }
        let Some(p) = parse_line(&line) else {
            tracing::warn!(line = lineno, accepted, "stopping at unparseable line");
            return Ok(LoadOutcome {
                accepted,
                stopped_at: Some(lineno),
            });
        };
        match curve.push(p) {
            Ok(()) => accepted += 1,
            Err(reason) => {
                tracing::warn!(line = lineno, accepted, %reason, "point breaks sequence");
                return Err(LoadError::PartialSequenceViolation {
                    line: lineno,
                    accepted,
                    reason,
                });
            }
        }
    }
    Ok(LoadOutcome {
        accepted,
        stopped_at: None,
    })
}

/// Read the whole of `path`; a missing file is `FileNotFound`.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })
}

/// Read `path` and append its points to `curve`.
///
/// The file is read completely before the first point is appended, so an I/O
/// failure never leaves a half-loaded curve behind.
pub fn load_file<P: AsRef<Path>>(path: P, curve: &mut Curve) -> Result<LoadOutcome, LoadError> {
    let path = path.as_ref();
    let text = read_source(path)?;
    let outcome = read_points(text.as_bytes(), curve)?;
    tracing::debug!(path = %path.display(), accepted = outcome.accepted, "loaded points");
    Ok(outcome)
}

/// Write `points` as `x y` lines.
pub fn write_points<W, I>(mut writer: W, points: I, cfg: SaveCfg) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Point>,
{
    for p in points {
        match cfg.precision {
            Some(prec) => writeln!(writer, "{:.*} {:.*}", prec, p.x, prec, p.y)?,
            None => writeln!(writer, "{} {}", p.x, p.y)?,
        }
    }
    writer.flush()
}

/// Save `points` to a new file at `path`; fails if `path` already exists.
pub fn save_file<P, I>(path: P, points: I, cfg: SaveCfg) -> Result<(), SaveError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Point>,
{
    let path = path.as_ref();
    write_new_file(path, |w| write_points(w, points, cfg))?;
    tracing::debug!(path = %path.display(), "saved points");
    Ok(())
}

/// Create `path` (never overwriting) and fill it with `write`.
///
/// A failed write removes the partial file so the same name can be retried.
fn write_new_file<F>(path: &Path, write: F) -> Result<(), SaveError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => SaveError::FileAlreadyExists(path.to_path_buf()),
            _ => SaveError::Io(e),
        })?;
    let mut w = BufWriter::new(file);
    let written = write(&mut w).and_then(|()| w.flush());
    if let Err(e) = written {
        drop(w);
        if let Err(rm) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %rm, "could not remove partial file");
        }
        return Err(SaveError::Io(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::MetricsError;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn parse_line_requires_exactly_two_floats() {
        assert_eq!(parse_line("1 2"), Some(point(1.0, 2.0)));
        assert_eq!(parse_line("  -1.5\t2e3  "), Some(point(-1.5, 2000.0)));
        assert_eq!(parse_line("1"), None);
        assert_eq!(parse_line("1 2 3"), None);
        assert_eq!(parse_line("x 2"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn load_stops_at_first_violation_and_keeps_prefix() {
        let mut c = Curve::new();
        let r = read_points(Cursor::new("0 0\n1 1\n0 2\n"), &mut c);
        match r {
            Err(LoadError::PartialSequenceViolation {
                line: 3,
                accepted: 2,
                reason: RejectionReason::OutOfSequence { .. },
            }) => {}
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(c.len(), 2);
        assert!(c.metrics().is_ok());
    }

    #[test]
    fn load_stops_quietly_at_garbage() {
        let mut c = Curve::new();
        let out = read_points(Cursor::new("0 0\n\n1 1\nend of data\n2 2\n"), &mut c).unwrap();
        assert_eq!(
            out,
            LoadOutcome {
                accepted: 2,
                stopped_at: Some(4)
            }
        );
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn load_reports_ambiguous_second_point() {
        let mut c = Curve::new();
        let r = read_points(Cursor::new("1 0\n1 5\n"), &mut c);
        assert!(matches!(
            r,
            Err(LoadError::PartialSequenceViolation {
                line: 2,
                accepted: 1,
                reason: RejectionReason::AmbiguousDirection { .. },
            })
        ));
    }

    #[test]
    fn empty_input_loads_nothing() {
        let mut c = Curve::new();
        let out = read_points(Cursor::new(""), &mut c).unwrap();
        assert_eq!(out.accepted, 0);
        assert_eq!(c.metrics(), Err(MetricsError::EmptySequence));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempdir().unwrap();
        let mut c = Curve::new();
        let r = load_file(dir.path().join("nope.txt"), &mut c);
        assert!(matches!(r, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn save_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.txt");
        std::fs::write(&path, "keep me\n").unwrap();
        let r = save_file(&path, [point(0.0, 0.0)], SaveCfg::default());
        assert!(matches!(r, Err(SaveError::FileAlreadyExists(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me\n");
    }

    #[test]
    fn save_then_load_is_bit_exact() {
        let pts = [
            point(-1e-300, 1.0 / 3.0),
            point(0.1, -0.0),
            point(0.2, 2.5e10),
            point(std::f64::consts::PI, -std::f64::consts::E),
        ];
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.txt");
        save_file(&path, pts, SaveCfg::default()).unwrap();
        let mut c = Curve::new();
        let out = load_file(&path, &mut c).unwrap();
        assert_eq!(out.accepted, pts.len());
        assert_eq!(out.stopped_at, None);
        for (a, b) in c.iter().zip(pts.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn failed_write_leaves_no_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.txt");
        let r = write_new_file(&path, |w| {
            writeln!(w, "0 0")?;
            Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"))
        });
        assert!(matches!(r, Err(SaveError::Io(_))));
        assert!(!path.exists());
        // The name is free again for a retry.
        save_file(&path, [point(0.0, 0.0)], SaveCfg::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0 0\n");
    }

    #[test]
    fn directory_path_is_io_error() {
        let dir = tempdir().unwrap();
        let mut c = Curve::new();
        c.push(point(0.0, 0.0)).unwrap();
        let r = load_file(dir.path(), &mut c);
        assert!(matches!(r, Err(LoadError::Io(_))));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn fixed_precision_format() {
        let mut buf = Vec::new();
        let cfg = SaveCfg { precision: Some(6) };
        write_points(&mut buf, [point(1.0, 2.5)], cfg).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1.000000 2.500000\n");
    }
}
