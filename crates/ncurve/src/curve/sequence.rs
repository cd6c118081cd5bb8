//! Ordered, owned point storage guarded by the monotone-X policy.

use nalgebra::Vector2;

use super::policy::admit;
use super::types::{Direction, Point, RejectionReason};

/// Ordered points whose X values move strictly one way.
///
/// Invariants:
/// - Insertion order is X order (ascending or descending per `direction`).
/// - `direction` is `Undetermined` iff `len() < 2`.
/// - A rejected append leaves the sequence untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSequence {
    points: Vec<Point>,
    direction: Direction,
}

impl PointSequence {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `p` as the new tail if the policy admits it.
    pub fn append(&mut self, p: Point) -> Result<(), RejectionReason> {
        self.direction = admit(self.direction, self.tail(), p)?;
        self.points.push(p);
        Ok(())
    }

    /// Drop every point and forget the direction.
    pub fn clear(&mut self) {
        self.points.clear();
        self.direction = Direction::Undetermined;
    }

    /// Points in stored order.
    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Point>> {
        self.points.iter().copied()
    }

    /// Read-only view of the stored points.
    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn head(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn tail(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Translate every point by `(dx, dy)`.
    ///
    /// The moved points are re-admitted into a fresh sequence first; if an
    /// offset is non-finite, or rounding makes neighbouring X values collide,
    /// `self` is left untouched and the reason is returned.
    pub(crate) fn translate(&mut self, dx: f64, dy: f64) -> Result<(), RejectionReason> {
        if !(dx.is_finite() && dy.is_finite()) {
            return Err(RejectionReason::NonFinite { x: dx, y: dy });
        }
        let t = Vector2::new(dx, dy);
        let mut moved = PointSequence {
            points: Vec::with_capacity(self.points.len()),
            direction: Direction::Undetermined,
        };
        for p in &self.points {
            moved.append(*p + t)?;
        }
        *self = moved;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PointSequence {
    type Item = Point;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Point>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
