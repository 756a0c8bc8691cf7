//! Repository port for board persistence.

use crate::board::domain::{Column, ColumnId, Position, PositionUpdate, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Single-row write that relocates a task.
///
/// `status` is `Some` only when the move changes the task's status; adapters
/// must leave the stored status untouched otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMove {
    /// Task being moved.
    pub task_id: TaskId,
    /// Destination column.
    pub column_id: ColumnId,
    /// New sort key within the destination column.
    pub position: Position,
    /// New status, when the destination column implies a different one.
    pub status: Option<TaskStatus>,
    /// Modification timestamp recorded with the move.
    pub updated_at: DateTime<Utc>,
}

/// Board persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateColumn`] when the column ID
    /// already exists.
    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Finds a column by identifier.
    async fn find_column_by_id(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Returns all columns ascending by board position.
    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateTask`] when the task ID
    /// already exists or [`BoardRepositoryError::ColumnNotFound`] when its
    /// column does not exist.
    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Persists every field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Deletes a task. Sibling positions are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_task_by_id(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Returns a column's tasks ascending by position.
    ///
    /// Moves never leave two tasks on one position, but rows written outside
    /// the service can. Equal positions are ordered most recently updated
    /// first.
    async fn list_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>>;

    /// Returns all tasks with the given status ascending by position.
    async fn list_tasks_by_status(&self, status: TaskStatus) -> BoardRepositoryResult<Vec<Task>>;

    /// Reassigns a task's column, position, and (optionally) status together
    /// with the position rewrites of its new siblings, as one atomic write.
    ///
    /// `siblings` is empty for a move that needs no renormalization. Either
    /// the move and every sibling rewrite are applied or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the moved task or
    /// any sibling does not exist, or
    /// [`BoardRepositoryError::ColumnNotFound`] for an unknown column.
    async fn apply_move(
        &self,
        task_move: &TaskMove,
        siblings: &[PositionUpdate],
    ) -> BoardRepositoryResult<()>;

    /// Applies a batch of position updates as one atomic write.
    ///
    /// Either every update is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when any referenced
    /// task does not exist.
    async fn update_positions(&self, updates: &[PositionUpdate]) -> BoardRepositoryResult<()>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
