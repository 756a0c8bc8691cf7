//! Sort key ordering a task among its column siblings.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Finite, non-negative sort key for a task within its column.
///
/// Positions need not be integral: a move between two siblings takes the
/// midpoint of their positions until the column is renormalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Position(f64);

impl Position {
    /// Position of the first slot in a canonical column.
    pub const ZERO: Self = Self(0.0);

    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidPosition`] when the value is not
    /// finite or is negative.
    pub fn new(value: f64) -> Result<Self, BoardDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(BoardDomainError::InvalidPosition(value));
        }
        // Collapse -0.0 so equal positions compare and hash alike.
        Ok(Self(value.abs()))
    }

    /// Builds a position from arithmetic on existing positions, pinning the
    /// result into the valid range.
    pub(crate) fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, f64::MAX).abs())
    }

    /// Returns the raw sort key.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` when the position has no fractional part.
    #[must_use]
    pub fn is_integral(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Position {
    type Error = BoardDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Position> for f64 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
