//! Derived curve statistics: path length, trapezoidal area, Y extrema.
//!
//! All quantities come from one pass over consecutive pairs of the stored order.
//! Area follows the trapezoid rule `Σ (x2 - x1)·(y1 + y2)/2`, so it is negative
//! when X travels in the descending direction. It is not the path length.

use super::types::{MetricsError, Point};

/// Snapshot of the statistics of a non-empty curve.
///
/// Invariants:
/// - `low`/`high` equal the points at `low_index`/`high_index`.
/// - Ties on Y keep the earliest point in stored order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveMetrics {
    pub length: f64,
    pub area: f64,
    pub low: Point,
    pub high: Point,
    pub low_index: usize,
    pub high_index: usize,
}

impl CurveMetrics {
    /// Compute all metrics for `points`; fails only when `points` is empty.
    pub fn compute(points: &[Point]) -> Result<Self, MetricsError> {
        let (&head, _) = points.split_first().ok_or(MetricsError::EmptySequence)?;
        let mut m = CurveMetrics {
            length: 0.0,
            area: 0.0,
            low: head,
            high: head,
            low_index: 0,
            high_index: 0,
        };
        for (k, pair) in points.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            m.length += segment_length(a, b);
            m.area += segment_area(a, b);
            if b.y < m.low.y {
                m.low = b;
                m.low_index = k + 1;
            }
            if b.y > m.high.y {
                m.high = b;
                m.high_index = k + 1;
            }
        }
        Ok(m)
    }
}

/// Euclidean distance between `a` and `b`.
#[inline]
pub fn segment_length(a: Point, b: Point) -> f64 {
    (b - a).norm()
}

/// Signed trapezoid area under the segment `a → b`.
#[inline]
pub fn segment_area(a: Point, b: Point) -> f64 {
    (b.x - a.x) * (a.y + b.y) * 0.5
}
