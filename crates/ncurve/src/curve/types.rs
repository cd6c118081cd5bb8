//! Basic curve types: points, the X-direction of a sequence, and rejection reasons.
//!
//! - `Point`: a plain `Vector2<f64>`; `.x`/`.y` are the coordinates.
//! - `Direction`: monotone X trend, fixed by the first two points.
//! - `RejectionReason`, `MetricsError`: discriminated failures reported to callers.

use nalgebra::Vector2;
use thiserror::Error;

/// A point of the curve, `(x, y)`.
pub type Point = Vector2<f64>;

/// Shorthand constructor for a `Point`.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Vector2::new(x, y)
}

/// Monotone X trend of a point sequence.
///
/// Invariants:
/// - `Undetermined` while the sequence holds fewer than two points.
/// - Never changes once set, until the sequence is cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Undetermined,
    Ascending,
    Descending,
}

impl Direction {
    /// Direction fixed by the first two X values; `None` if they are equal.
    #[inline]
    pub fn from_pair(x1: f64, x2: f64) -> Option<Direction> {
        if x2 > x1 {
            Some(Direction::Ascending)
        } else if x2 < x1 {
            Some(Direction::Descending)
        } else {
            None
        }
    }

    /// Strict continuation test: does `x` follow `tail_x` in this direction?
    ///
    /// `Undetermined` continues nothing.
    #[inline]
    pub fn continues(self, tail_x: f64, x: f64) -> bool {
        match self {
            Direction::Ascending => x > tail_x,
            Direction::Descending => x < tail_x,
            Direction::Undetermined => false,
        }
    }

    #[inline]
    pub fn is_determined(self) -> bool {
        self != Direction::Undetermined
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::Undetermined => "undetermined",
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        };
        f.write_str(s)
    }
}

/// Why a candidate point was not appended.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RejectionReason {
    /// Candidate X does not strictly continue the established direction.
    #[error("x={x} does not continue the {direction} sequence after x={tail_x}")]
    OutOfSequence {
        direction: Direction,
        tail_x: f64,
        x: f64,
    },
    /// Second point repeats the first point's X, so no direction can be fixed.
    #[error("points must have distinct x on entry 2 (both are x={x})")]
    AmbiguousDirection { x: f64 },
    /// NaN or infinite coordinate.
    #[error("coordinates must be finite, got ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Metrics are undefined for an empty curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("no points loaded")]
    EmptySequence,
}
