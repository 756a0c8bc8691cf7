//! Service layer for board queries, task editing, and drag-and-drop moves.

use crate::board::{
    domain::{
        BoardColumn, BoardDomainError, Column, ColumnId, ColumnTitle, Position, PositionUpdate,
        Renumbering, Task, TaskDescription, TaskDetails, TaskId, TaskPriority, TaskStatus,
        TaskTitle, append_position, compute_move, renormalize, renumber_move,
    },
    ports::{BoardRepository, BoardRepositoryError, TaskMove},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for adding a column to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateColumnRequest {
    title: String,
    position: i32,
    status: Option<TaskStatus>,
}

impl CreateColumnRequest {
    /// Creates a request for a column at `position` on the board.
    #[must_use]
    pub fn new(title: impl Into<String>, position: i32) -> Self {
        Self {
            title: title.into(),
            position,
            status: None,
        }
    }

    /// Sets the status tasks adopt when moved into the column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// User-editable task fields prior to validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
}

impl TaskFields {
    /// Creates task fields with the required values.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: TaskPriority, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            status,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(self) -> Result<TaskDetails, BoardDomainError> {
        let description = self
            .description
            .map(TaskDescription::new)
            .transpose()?
            .flatten();
        Ok(TaskDetails {
            title: TaskTitle::new(self.title)?,
            description,
            priority: self.priority,
            status: self.status,
        })
    }
}

/// Request payload for creating a task at the end of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Task fields.
    pub fields: TaskFields,
    /// Column receiving the task.
    pub column_id: ColumnId,
}

impl CreateTaskRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(fields: TaskFields, column_id: ColumnId) -> Self {
        Self { fields, column_id }
    }
}

/// Request payload for editing a task.
///
/// Changing `column_id` moves the task to the end of that column; otherwise
/// the task keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// Replacement task fields.
    pub fields: TaskFields,
    /// Column the task should belong to.
    pub column_id: ColumnId,
}

impl UpdateTaskRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(fields: TaskFields, column_id: ColumnId) -> Self {
        Self { fields, column_id }
    }
}

/// Request payload for a drag-and-drop move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTaskRequest {
    /// Task being dragged.
    pub task_id: TaskId,
    /// Column the client saw the task in when the drag started.
    pub source_column_id: ColumnId,
    /// Column the task was dropped into.
    pub destination_column_id: ColumnId,
    /// Target slot among the destination column's other tasks. Values past
    /// the end append.
    pub destination_index: usize,
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task was dropped onto the slot it already occupies; nothing was
    /// written.
    Unchanged(Task),
    /// The task was moved.
    Moved {
        /// Task as persisted after the move.
        task: Task,
        /// Whether the destination column was rewritten to integer positions.
        renormalized: bool,
    },
}

impl MoveOutcome {
    /// Returns the task in its final state.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::Unchanged(task) | Self::Moved { task, .. } => task,
        }
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// No column exists with the given identifier.
    #[error("column {0} not found")]
    ColumnNotFound(ColumnId),
    /// The task is no longer in the column the move started from.
    #[error("task {task_id} is in column {actual}, not {expected}")]
    SourceColumnMismatch {
        /// Task being moved.
        task_id: TaskId,
        /// Column named by the request.
        expected: ColumnId,
        /// Column the task currently belongs to.
        actual: ColumnId,
    },
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> BoardServiceResult<Task> {
        self.repository
            .find_task_by_id(task_id)
            .await?
            .ok_or(BoardServiceError::TaskNotFound(task_id))
    }

    async fn find_column_or_error(&self, column_id: ColumnId) -> BoardServiceResult<Column> {
        self.repository
            .find_column_by_id(column_id)
            .await?
            .ok_or(BoardServiceError::ColumnNotFound(column_id))
    }

    async fn end_of_column(&self, column_id: ColumnId) -> BoardServiceResult<Position> {
        let tasks = self.repository.list_tasks_in_column(column_id).await?;
        Ok(append_position(tasks.iter().map(Task::position)))
    }

    /// Adds a column to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for a blank title or repository
    /// errors when persistence fails.
    pub async fn create_column(&self, request: CreateColumnRequest) -> BoardServiceResult<Column> {
        let title = ColumnTitle::new(request.title)?;
        let column = Column::new(title, request.position, request.status, &*self.clock);
        self.repository.store_column(&column).await?;
        info!(column_id = %column.id(), title = %column.title(), "created column");
        Ok(column)
    }

    /// Lists columns in board order.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the lookup fails.
    pub async fn list_columns(&self) -> BoardServiceResult<Vec<Column>> {
        Ok(self.repository.list_columns().await?)
    }

    /// Returns every column with its tasks in display order.
    ///
    /// # Errors
    ///
    /// Returns repository errors when a lookup fails.
    pub async fn board(&self) -> BoardServiceResult<Vec<BoardColumn>> {
        let columns = self.repository.list_columns().await?;
        let mut board = Vec::with_capacity(columns.len());
        for column in columns {
            let tasks = self.repository.list_tasks_in_column(column.id()).await?;
            board.push(BoardColumn { column, tasks });
        }
        debug!(columns = board.len(), "loaded board");
        Ok(board)
    }

    /// Returns all tasks with `status` ascending by position.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the lookup fails.
    pub async fn tasks_by_status(&self, status: TaskStatus) -> BoardServiceResult<Vec<Task>> {
        Ok(self.repository.list_tasks_by_status(status).await?)
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`] when no task has the given
    /// ID, or repository errors.
    pub async fn get_task(&self, task_id: TaskId) -> BoardServiceResult<Task> {
        self.find_task_or_error(task_id).await
    }

    /// Creates a task at the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when validation fails,
    /// [`BoardServiceError::ColumnNotFound`] when the column does not exist,
    /// or repository errors.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardServiceResult<Task> {
        let details = request.fields.validate()?;
        let column = self.find_column_or_error(request.column_id).await?;
        let position = self.end_of_column(column.id()).await?;
        let task = Task::new(details, column.id(), position, &*self.clock);
        self.repository.store_task(&task).await?;
        info!(task_id = %task.id(), column_id = %column.id(), %position, "created task");
        Ok(task)
    }

    /// Edits a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when validation fails,
    /// [`BoardServiceError::TaskNotFound`] or
    /// [`BoardServiceError::ColumnNotFound`] for unknown references, or
    /// repository errors.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> BoardServiceResult<Task> {
        let details = request.fields.validate()?;
        let mut task = self.find_task_or_error(task_id).await?;
        task.edit(details, &*self.clock);

        if task.column_id() != request.column_id {
            let column = self.find_column_or_error(request.column_id).await?;
            let position = self.end_of_column(column.id()).await?;
            task.place(column.id(), position, None, &*self.clock);
            debug!(%task_id, column_id = %column.id(), %position, "edit moved task to new column");
        }

        self.repository.update_task(&task).await?;
        info!(%task_id, "updated task");
        Ok(task)
    }

    /// Deletes a task. Remaining tasks keep their positions.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`] when no task has the given
    /// ID, or repository errors.
    pub async fn delete_task(&self, task_id: TaskId) -> BoardServiceResult<()> {
        self.find_task_or_error(task_id).await?;
        self.repository.delete_task(task_id).await?;
        info!(%task_id, "deleted task");
        Ok(())
    }

    /// Moves a task within or between columns.
    ///
    /// The destination column is read fresh and the new position computed by
    /// the reorder engine. When the position is fractional or collides with a
    /// neighbour the column is renumbered around the task's new slot. The
    /// task's column, position, and (if the column implies a different one)
    /// status are written in one atomic update together with any sibling
    /// rewrites, so a failed write leaves the board as it was.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`],
    /// [`BoardServiceError::ColumnNotFound`], or
    /// [`BoardServiceError::SourceColumnMismatch`] for stale or unknown
    /// references, or repository errors when the move cannot be persisted.
    pub async fn move_task(&self, request: MoveTaskRequest) -> BoardServiceResult<MoveOutcome> {
        let mut task = self.find_task_or_error(request.task_id).await?;
        if task.column_id() != request.source_column_id {
            return Err(BoardServiceError::SourceColumnMismatch {
                task_id: task.id(),
                expected: request.source_column_id,
                actual: task.column_id(),
            });
        }
        let destination = self
            .find_column_or_error(request.destination_column_id)
            .await?;

        let snapshot = self
            .repository
            .list_tasks_in_column(destination.id())
            .await?;
        let current_index = snapshot.iter().position(|sibling| sibling.id() == task.id());
        let siblings: Vec<(TaskId, Position)> = snapshot
            .iter()
            .filter(|sibling| sibling.id() != task.id())
            .map(|sibling| (sibling.id(), sibling.position()))
            .collect();
        let slot = request.destination_index.min(siblings.len());

        if current_index == Some(slot) {
            debug!(task_id = %task.id(), slot, "task dropped onto its own slot");
            return Ok(MoveOutcome::Unchanged(task));
        }

        let sibling_positions: Vec<Position> =
            siblings.iter().map(|&(_, position)| position).collect();
        let placement = compute_move(&sibling_positions, slot);
        let renormalized = placement.needs_renormalization();
        let Renumbering {
            position,
            siblings: rewrites,
        } = if renormalized {
            renumber_move(&siblings, (task.id(), placement.position()), slot)
        } else {
            Renumbering {
                position: placement.position(),
                siblings: Vec::new(),
            }
        };

        let changed_status = task.place(
            destination.id(),
            position,
            destination.status(),
            &*self.clock,
        );
        self.repository
            .apply_move(
                &TaskMove {
                    task_id: task.id(),
                    column_id: destination.id(),
                    position,
                    status: changed_status,
                    updated_at: task.updated_at(),
                },
                &rewrites,
            )
            .await?;
        info!(
            task_id = %task.id(),
            from = %request.source_column_id,
            to = %destination.id(),
            %position,
            status_changed = changed_status.is_some(),
            rewritten = rewrites.len(),
            "moved task"
        );

        Ok(MoveOutcome::Moved { task, renormalized })
    }

    /// Re-reads a column and persists consecutive integer positions for it.
    ///
    /// Returns the updates that were applied; a column that is already
    /// canonical produces none and is not written.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the read or the batch write fails.
    pub async fn renormalize_column(
        &self,
        column_id: ColumnId,
    ) -> BoardServiceResult<Vec<PositionUpdate>> {
        let ordered = self.repository.list_tasks_in_column(column_id).await?;
        let updates = renormalize(ordered.iter().map(|task| (task.id(), task.position())));
        if updates.is_empty() {
            return Ok(updates);
        }
        self.repository.update_positions(&updates).await?;
        debug!(%column_id, rewritten = updates.len(), "renormalized column");
        Ok(updates)
    }
}
