//! Monotone-X insertion policy.
//!
//! The decision is a pure function of the current direction, the tail point and
//! the candidate; the sequence owns the only state (its `Direction`).

use super::types::{Direction, Point, RejectionReason};

/// Decide whether `candidate` may follow `tail` under `direction`.
///
/// Returns the direction the sequence has after accepting the candidate.
///
/// Rules
/// - Non-finite coordinates are always rejected.
/// - No tail (empty sequence): accept, direction stays `Undetermined`.
/// - Tail but no direction (one point): the pair fixes the direction; equal X
///   is rejected as `AmbiguousDirection`.
/// - Otherwise the candidate X must strictly continue the direction.
pub fn admit(
    direction: Direction,
    tail: Option<Point>,
    candidate: Point,
) -> Result<Direction, RejectionReason> {
    if !(candidate.x.is_finite() && candidate.y.is_finite()) {
        return Err(RejectionReason::NonFinite {
            x: candidate.x,
            y: candidate.y,
        });
    }
    let Some(tail) = tail else {
        return Ok(Direction::Undetermined);
    };
    if !direction.is_determined() {
        return Direction::from_pair(tail.x, candidate.x)
            .ok_or(RejectionReason::AmbiguousDirection { x: candidate.x });
    }
    if direction.continues(tail.x, candidate.x) {
        Ok(direction)
    } else {
        Err(RejectionReason::OutOfSequence {
            direction,
            tail_x: tail.x,
            x: candidate.x,
        })
    }
}
