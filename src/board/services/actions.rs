//! Client-facing board actions.
//!
//! Actions accept loosely typed input as a board client sends it, validate
//! it, call [`BoardService`], and fold every outcome into an
//! [`ActionResponse`]. Failures never escape as errors; they are logged and
//! reported with `success: false` and a human-readable message.

use super::board::{
    BoardService, BoardServiceError, CreateTaskRequest, MoveOutcome, MoveTaskRequest, TaskFields,
    UpdateTaskRequest,
};
use crate::board::{
    domain::{
        BoardColumn, BoardDomainError, Column, ColumnId, Task, TaskId, TaskPriority, TaskStatus,
    },
    ports::{BoardRepository, BoardRepositoryError},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Uniform envelope returned by every board action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse<T> {
    /// Whether the action succeeded.
    pub success: bool,
    /// Confirmation text for successful mutations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload for successful queries and mutations that return data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResponse<T> {
    /// Creates a successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a successful response with a confirmation message and no
    /// payload.
    #[must_use]
    pub fn confirmed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Adds a confirmation message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Creates a failed response.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Move request as sent by a drag-and-drop client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskInput {
    /// Task being dragged.
    pub task_id: String,
    /// Column the drag started in.
    pub source_column_id: String,
    /// Column the task was dropped into.
    pub destination_column_id: String,
    /// Index the task occupied in the source column.
    pub source_index: i64,
    /// Target index among the destination column's other tasks.
    pub destination_index: i64,
}

impl MoveTaskInput {
    fn validate(&self) -> Result<MoveTaskRequest, BoardDomainError> {
        let task_id = TaskId::parse(&self.task_id)?;
        let source_column_id = ColumnId::parse(&self.source_column_id)?;
        let destination_column_id = ColumnId::parse(&self.destination_column_id)?;
        index_from("sourceIndex", self.source_index)?;
        let destination_index = index_from("destinationIndex", self.destination_index)?;
        Ok(MoveTaskRequest {
            task_id,
            source_column_id,
            destination_column_id,
            destination_index,
        })
    }
}

fn index_from(field: &'static str, value: i64) -> Result<usize, BoardDomainError> {
    usize::try_from(value).map_err(|_| BoardDomainError::NegativeIndex { field, value })
}

/// Task form submission for create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFormInput {
    /// Task title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority name: `low`, `medium`, or `high`.
    pub priority: String,
    /// Status name: `todo`, `in-progress`, or `done`.
    pub status: String,
    /// Column the task belongs to.
    #[serde(default)]
    pub column_id: String,
}

impl TaskFormInput {
    fn validate(self) -> Result<(TaskFields, ColumnId), BoardDomainError> {
        let priority = TaskPriority::try_from(self.priority.as_str())?;
        let status = TaskStatus::try_from(self.status.as_str())?;
        let column_id = ColumnId::parse(&self.column_id)?;
        let base = TaskFields::new(self.title, priority, status);
        let fields = match self.description {
            Some(description) => base.with_description(description),
            None => base,
        };
        Ok((fields, column_id))
    }
}

/// Renders a service failure for display, naming the attempted action when
/// the cause is an infrastructure fault.
fn describe_failure(err: &BoardServiceError, action: &str) -> String {
    match err {
        BoardServiceError::Domain(domain) => domain.to_string(),
        BoardServiceError::TaskNotFound(_)
        | BoardServiceError::Repository(BoardRepositoryError::TaskNotFound(_)) => {
            "Task not found".to_owned()
        }
        BoardServiceError::ColumnNotFound(_)
        | BoardServiceError::Repository(BoardRepositoryError::ColumnNotFound(_)) => {
            "Column not found".to_owned()
        }
        BoardServiceError::SourceColumnMismatch { .. } => {
            "Task is no longer in the source column".to_owned()
        }
        BoardServiceError::Repository(_) => format!("Failed to {action}"),
    }
}

fn failed<T>(err: &BoardServiceError, action: &str) -> ActionResponse<T> {
    match err {
        BoardServiceError::Repository(
            BoardRepositoryError::Persistence(_)
            | BoardRepositoryError::DuplicateTask(_)
            | BoardRepositoryError::DuplicateColumn(_),
        ) => {
            error!(error = %err, action, "board action failed");
        }
        _ => warn!(error = %err, action, "board action rejected"),
    }
    ActionResponse::failure(describe_failure(err, action))
}

fn rejected<T>(err: &BoardDomainError, action: &str) -> ActionResponse<T> {
    warn!(error = %err, action, "board action input rejected");
    ActionResponse::failure(err.to_string())
}

/// Board actions over a [`BoardService`].
#[derive(Clone)]
pub struct BoardActions<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    service: BoardService<R, C>,
}

impl<R, C> BoardActions<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Wraps a board service.
    #[must_use]
    pub const fn new(service: BoardService<R, C>) -> Self {
        Self { service }
    }

    /// Returns the underlying service.
    #[must_use]
    pub const fn service(&self) -> &BoardService<R, C> {
        &self.service
    }

    /// Lists the board's columns in order.
    pub async fn get_columns(&self) -> ActionResponse<Vec<Column>> {
        match self.service.list_columns().await {
            Ok(columns) => ActionResponse::ok(columns),
            Err(err) => failed(&err, "fetch columns"),
        }
    }

    /// Returns every column with its tasks in display order.
    pub async fn get_board(&self) -> ActionResponse<Vec<BoardColumn>> {
        match self.service.board().await {
            Ok(board) => ActionResponse::ok(board),
            Err(err) => failed(&err, "fetch board"),
        }
    }

    /// Lists tasks with the named status.
    pub async fn get_tasks_by_status(&self, status: &str) -> ActionResponse<Vec<Task>> {
        let parsed = match TaskStatus::try_from(status) {
            Ok(parsed) => parsed,
            Err(err) => return rejected(&BoardDomainError::from(err), "fetch tasks"),
        };
        match self.service.tasks_by_status(parsed).await {
            Ok(tasks) => ActionResponse::ok(tasks),
            Err(err) => failed(&err, "fetch tasks"),
        }
    }

    /// Fetches one task.
    pub async fn get_task(&self, task_id: &str) -> ActionResponse<Task> {
        let id = match TaskId::parse(task_id) {
            Ok(id) => id,
            Err(err) => return rejected(&err, "fetch task"),
        };
        match self.service.get_task(id).await {
            Ok(task) => ActionResponse::ok(task),
            Err(err) => failed(&err, "fetch task"),
        }
    }

    /// Creates a task at the end of its column.
    pub async fn create_task(&self, input: TaskFormInput) -> ActionResponse<Task> {
        let (fields, column_id) = match input.validate() {
            Ok(validated) => validated,
            Err(err) => return rejected(&err, "create task"),
        };
        match self
            .service
            .create_task(CreateTaskRequest::new(fields, column_id))
            .await
        {
            Ok(task) => ActionResponse::ok(task).with_message("Task created successfully"),
            Err(err) => failed(&err, "create task"),
        }
    }

    /// Applies a task form edit.
    pub async fn update_task(&self, task_id: &str, input: TaskFormInput) -> ActionResponse<Task> {
        let id = match TaskId::parse(task_id) {
            Ok(id) => id,
            Err(err) => return rejected(&err, "update task"),
        };
        let (fields, column_id) = match input.validate() {
            Ok(validated) => validated,
            Err(err) => return rejected(&err, "update task"),
        };
        match self
            .service
            .update_task(id, UpdateTaskRequest::new(fields, column_id))
            .await
        {
            Ok(task) => ActionResponse::ok(task).with_message("Task updated successfully"),
            Err(err) => failed(&err, "update task"),
        }
    }

    /// Deletes a task.
    pub async fn delete_task(&self, task_id: &str) -> ActionResponse<()> {
        let id = match TaskId::parse(task_id) {
            Ok(id) => id,
            Err(err) => return rejected(&err, "delete task"),
        };
        match self.service.delete_task(id).await {
            Ok(()) => ActionResponse::confirmed("Task deleted successfully"),
            Err(err) => failed(&err, "delete task"),
        }
    }

    /// Handles a drag-and-drop move.
    pub async fn move_task(&self, input: &MoveTaskInput) -> ActionResponse<()> {
        let request = match input.validate() {
            Ok(request) => request,
            Err(err) => return rejected(&err, "move task"),
        };
        match self.service.move_task(request).await {
            Ok(MoveOutcome::Unchanged(_)) => ActionResponse::confirmed("Task position unchanged"),
            Ok(MoveOutcome::Moved { task, renormalized }) => {
                info!(
                    task_id = %task.id(),
                    source_index = input.source_index,
                    destination_index = input.destination_index,
                    renormalized,
                    "move request completed"
                );
                ActionResponse::confirmed("Task moved successfully")
            }
            Err(err) => failed(&err, "move task"),
        }
    }
}
