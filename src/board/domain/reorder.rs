//! Reorder engine for drag-and-drop moves.
//!
//! A moved task takes the midpoint of its new neighbours' positions, so a
//! move normally touches a single row. Midpoints accumulate fractional drift;
//! whenever a move produces a fractional or colliding position the column is
//! flagged, and [`renumber_move`] rewrites it to `0, 1, 2, …` so the move and
//! the sibling rewrites can be persisted together.
//!
//! Everything here is pure: callers supply snapshots read from the store and
//! persist whatever the functions return.

use super::{Position, TaskId};

/// Result of placing a task into a destination column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlacement {
    position: Position,
    needs_renormalization: bool,
}

impl MovePlacement {
    /// Returns the moved task's new position.
    #[must_use]
    pub const fn position(self) -> Position {
        self.position
    }

    /// Returns `true` when the destination column should be rewritten to
    /// consecutive integers as part of the move.
    #[must_use]
    pub const fn needs_renormalization(self) -> bool {
        self.needs_renormalization
    }
}

/// New position for a single task produced by [`renormalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    /// Task whose position changes.
    pub task_id: TaskId,
    /// Canonical position assigned to the task.
    pub position: Position,
}

/// Computes where a task lands when dropped at `destination_index`.
///
/// `destination` holds the destination column's positions in ascending
/// order, excluding the task being moved. `destination_index` is expected in
/// `0..=destination.len()`; larger values append.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::{Position, compute_move};
///
/// let column = [Position::new(0.0)?, Position::new(1.0)?];
/// let placement = compute_move(&column, 1);
/// assert_eq!(placement.position(), Position::new(0.5)?);
/// assert!(placement.needs_renormalization());
/// # Ok::<(), taskboard::board::domain::BoardDomainError>(())
/// ```
#[must_use]
pub fn compute_move(destination: &[Position], destination_index: usize) -> MovePlacement {
    let (Some(&first), Some(&last)) = (destination.first(), destination.last()) else {
        return MovePlacement {
            position: Position::ZERO,
            needs_renormalization: false,
        };
    };

    let slot = destination_index.min(destination.len());
    let before = slot
        .checked_sub(1)
        .and_then(|index| destination.get(index))
        .copied();
    let after = destination.get(slot).copied();

    let position = match (before, after) {
        (None, _) => before_first(first),
        (Some(_), None) => after_last(last),
        (Some(lower), Some(upper)) => midpoint(lower, upper),
    };

    let collides = before.is_some_and(|lower| lower == position)
        || after.is_some_and(|upper| upper == position);

    MovePlacement {
        position,
        needs_renormalization: !position.is_integral() || collides,
    }
}

/// Position for a task appended to a column.
///
/// Returns `max + 1`, or zero for an empty column.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "positions are fractional sort keys"
)]
pub fn append_position(existing: impl IntoIterator<Item = Position>) -> Position {
    existing
        .into_iter()
        .max()
        .map_or(Position::ZERO, |last| Position::clamped(last.value() + 1.0))
}

/// Rewrites an ordered column to consecutive integer positions.
///
/// `ordered` must already be sorted the way the column should read. Only
/// tasks whose position actually changes are returned, so renormalizing a
/// canonical column yields no updates.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::{Position, TaskId, renormalize};
///
/// let ids = [TaskId::new(), TaskId::new(), TaskId::new()];
/// let column = [
///     (ids[0], Position::new(0.0)?),
///     (ids[1], Position::new(0.5)?),
///     (ids[2], Position::new(3.0)?),
/// ];
/// let updates = renormalize(column);
/// assert_eq!(updates.len(), 2);
/// # Ok::<(), taskboard::board::domain::BoardDomainError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "canonical positions are counted in the sort-key domain"
)]
pub fn renormalize(ordered: impl IntoIterator<Item = (TaskId, Position)>) -> Vec<PositionUpdate> {
    let mut next = 0.0_f64;
    let mut updates = Vec::new();
    for (task_id, current) in ordered {
        let canonical = Position::clamped(next);
        if current != canonical {
            updates.push(PositionUpdate {
                task_id,
                position: canonical,
            });
        }
        next += 1.0;
    }
    updates
}

/// A flagged move resolved against its destination column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renumbering {
    /// Final integer position of the moved task.
    pub position: Position,
    /// Rewrites for the other tasks in the column.
    pub siblings: Vec<PositionUpdate>,
}

/// Renumbers a destination column as it reads once `moved` lands at `slot`.
///
/// `siblings` is the column snapshot in display order, excluding the moved
/// task; `moved` pairs the task with the position [`compute_move`] gave it.
/// The moved task is inserted at `slot` (clamped to the column length) and
/// the whole sequence rewritten to `0, 1, 2, …`.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::{Position, TaskId, renumber_move};
///
/// let (first, second, moved) = (TaskId::new(), TaskId::new(), TaskId::new());
/// let siblings = [(first, Position::new(0.0)?), (second, Position::new(1.0)?)];
/// let renumbering = renumber_move(&siblings, (moved, Position::new(0.5)?), 1);
/// assert_eq!(renumbering.position, Position::new(1.0)?);
/// assert_eq!(renumbering.siblings.len(), 1);
/// # Ok::<(), taskboard::board::domain::BoardDomainError>(())
/// ```
#[must_use]
pub fn renumber_move(
    siblings: &[(TaskId, Position)],
    moved: (TaskId, Position),
    slot: usize,
) -> Renumbering {
    let (moved_id, placed) = moved;
    let (before, after) = siblings.split_at(slot.min(siblings.len()));
    let ordered = before
        .iter()
        .copied()
        .chain(std::iter::once(moved))
        .chain(after.iter().copied());
    let (own, rewrites): (Vec<PositionUpdate>, Vec<PositionUpdate>) = renormalize(ordered)
        .into_iter()
        .partition(|update| update.task_id == moved_id);
    Renumbering {
        position: own.first().map_or(placed, |update| update.position),
        siblings: rewrites,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "positions are fractional sort keys"
)]
fn before_first(first: Position) -> Position {
    // Ties at zero are left for renormalization.
    Position::clamped((first.value() - 1.0).max(0.0))
}

#[expect(
    clippy::float_arithmetic,
    reason = "positions are fractional sort keys"
)]
fn after_last(last: Position) -> Position {
    Position::clamped(last.value() + 1.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "positions are fractional sort keys"
)]
fn midpoint(lower: Position, upper: Position) -> Position {
    let (low, high) = (lower.value(), upper.value());
    Position::clamped(low + (high - low) / 2.0)
}
