//! In-memory board repository for tests and demos.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{
        Column, ColumnId, PersistedTaskData, PositionUpdate, Task, TaskDetails, TaskId, TaskStatus,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult, TaskMove},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Display order within a column: position, then most recently updated.
fn display_order(left: &Task, right: &Task) -> Ordering {
    left.position()
        .cmp(&right.position())
        .then_with(|| right.updated_at().cmp(&left.updated_at()))
        .then_with(|| left.id().as_ref().cmp(right.id().as_ref()))
}

fn sorted_tasks<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks.cloned().collect();
    selected.sort_by(display_order);
    selected
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.columns.contains_key(&column.id()) {
            return Err(BoardRepositoryError::DuplicateColumn(column.id()));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn find_column_by_id(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        let state = self.read()?;
        Ok(state.columns.get(&id).cloned())
    }

    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        let state = self.read()?;
        let mut columns: Vec<Column> = state.columns.values().cloned().collect();
        columns.sort_by_key(|column| (column.position(), column.created_at()));
        Ok(columns)
    }

    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(BoardRepositoryError::DuplicateTask(task.id()));
        }
        if !state.columns.contains_key(&task.column_id()) {
            return Err(BoardRepositoryError::ColumnNotFound(task.column_id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.columns.contains_key(&task.column_id()) {
            return Err(BoardRepositoryError::ColumnNotFound(task.column_id()));
        }
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(BoardRepositoryError::TaskNotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(BoardRepositoryError::TaskNotFound(id))
    }

    async fn find_task_by_id(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(sorted_tasks(
            state
                .tasks
                .values()
                .filter(|task| task.column_id() == column_id),
        ))
    }

    async fn list_tasks_by_status(&self, status: TaskStatus) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(sorted_tasks(
            state.tasks.values().filter(|task| task.status() == status),
        ))
    }

    async fn apply_move(
        &self,
        task_move: &TaskMove,
        siblings: &[PositionUpdate],
    ) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.columns.contains_key(&task_move.column_id) {
            return Err(BoardRepositoryError::ColumnNotFound(task_move.column_id));
        }
        ensure_tasks_exist(&state, siblings)?;
        let stored = state
            .tasks
            .get(&task_move.task_id)
            .ok_or(BoardRepositoryError::TaskNotFound(task_move.task_id))?;

        // Rebuild through the persisted form so the write mirrors a row update.
        let mut data = PersistedTaskData {
            id: stored.id(),
            details: TaskDetails {
                title: stored.title().clone(),
                description: stored.description().cloned(),
                priority: stored.priority(),
                status: stored.status(),
            },
            column_id: task_move.column_id,
            position: task_move.position,
            created_at: stored.created_at(),
            updated_at: task_move.updated_at,
        };
        if let Some(status) = task_move.status {
            data.details.status = status;
        }
        state
            .tasks
            .insert(task_move.task_id, Task::from_persisted(data));
        reposition_all(&mut state, siblings);
        Ok(())
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        ensure_tasks_exist(&state, updates)?;
        reposition_all(&mut state, updates);
        Ok(())
    }
}

fn ensure_tasks_exist(
    state: &InMemoryBoardState,
    updates: &[PositionUpdate],
) -> BoardRepositoryResult<()> {
    updates
        .iter()
        .find(|update| !state.tasks.contains_key(&update.task_id))
        .map_or(Ok(()), |missing| {
            Err(BoardRepositoryError::TaskNotFound(missing.task_id))
        })
}

fn reposition_all(state: &mut InMemoryBoardState, updates: &[PositionUpdate]) {
    for update in updates {
        if let Some(task) = state.tasks.get_mut(&update.task_id) {
            task.reposition(update.position);
        }
    }
}
