//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("Title is required")]
    EmptyTaskTitle,

    /// The task title exceeds the character limit.
    #[error("Title must be less than {max} characters (got {actual})")]
    TaskTitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// The task description exceeds the character limit.
    #[error("Description must be less than {max} characters (got {actual})")]
    TaskDescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// The column title is empty after trimming.
    #[error("Column title is required")]
    EmptyColumnTitle,

    /// No column identifier was supplied.
    #[error("Column is required")]
    MissingColumnId,

    /// The column identifier is not a valid UUID.
    #[error("invalid column id '{0}'")]
    InvalidColumnId(String),

    /// The task identifier is not a valid UUID.
    #[error("invalid task id '{0}'")]
    InvalidTaskId(String),

    /// A position value was NaN, infinite, or negative.
    #[error("invalid position {0}, expected a finite non-negative number")]
    InvalidPosition(f64),

    /// A list index supplied by a client was negative.
    #[error("{field} must be a non-negative integer (got {value})")]
    NegativeIndex {
        /// Name of the offending request field.
        field: &'static str,
        /// Supplied value.
        value: i64,
    },

    /// The priority value is unsupported.
    #[error(transparent)]
    Priority(#[from] ParseTaskPriorityError),

    /// The status value is unsupported.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
