//! `PostgreSQL` repository implementation for board storage.

use super::{
    models::{ColumnRow, NewColumnRow, NewTaskRow, TaskRow},
    schema::{board_columns, board_tasks},
};
use crate::board::{
    domain::{
        Column, ColumnId, ColumnTitle, PersistedColumnData, PersistedTaskData, Position,
        PositionUpdate, Task, TaskDescription, TaskDetails, TaskId, TaskPriority, TaskStatus,
        TaskTitle,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult, TaskMove},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let column_id = column.id();
        let new_row = to_new_column_row(column);

        self.run_blocking(move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateColumn(column_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_column_by_id(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .filter(board_columns::id.eq(id.into_inner()))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = board_columns::table
                .order((board_columns::position.asc(), board_columns::created_at.asc()))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)?;
            rows.into_iter().map(row_to_column).collect()
        })
        .await
    }

    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let task_id = task.id();
        let column_id = task.column_id();
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(board_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateTask(task_id)
                    }
                    other => map_column_violation(other, column_id),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let task_id = task.id();
        let column_id = task.column_id();
        let row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(board_tasks::table.filter(board_tasks::id.eq(row.id)))
                    .set(&row)
                    .execute(connection)
                    .map_err(|err| map_column_violation(err, column_id))?;
            if updated_count == 0 {
                return Err(BoardRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(board_tasks::table.filter(board_tasks::id.eq(id.into_inner())))
                    .execute(connection)?;
            if deleted_count == 0 {
                return Err(BoardRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task_by_id(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = board_tasks::table
                .filter(board_tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = board_tasks::table
                .filter(board_tasks::column_id.eq(column_id.into_inner()))
                .order((
                    board_tasks::position.asc(),
                    board_tasks::updated_at.desc(),
                    board_tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_tasks_by_status(&self, status: TaskStatus) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = board_tasks::table
                .filter(board_tasks::status.eq(status.as_str()))
                .order((
                    board_tasks::position.asc(),
                    board_tasks::updated_at.desc(),
                    board_tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn apply_move(
        &self,
        task_move: &TaskMove,
        siblings: &[PositionUpdate],
    ) -> BoardRepositoryResult<()> {
        let relocation = *task_move;
        let batch = siblings.to_vec();

        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                write_move(tx, &relocation)?;
                write_positions(tx, &batch)
            })
        })
        .await
    }

    async fn update_positions(&self, updates: &[PositionUpdate]) -> BoardRepositoryResult<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let batch = updates.to_vec();

        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| write_positions(tx, &batch))
        })
        .await
    }
}

fn write_move(connection: &mut PgConnection, task_move: &TaskMove) -> BoardRepositoryResult<()> {
    let TaskMove {
        task_id,
        column_id,
        position,
        status,
        updated_at,
    } = *task_move;

    let target = board_tasks::table.filter(board_tasks::id.eq(task_id.into_inner()));
    let placement = (
        board_tasks::column_id.eq(column_id.into_inner()),
        board_tasks::position.eq(position.value()),
        board_tasks::updated_at.eq(updated_at),
    );
    let result = match status {
        Some(new_status) => diesel::update(target)
            .set((placement, board_tasks::status.eq(new_status.as_str())))
            .execute(connection),
        None => diesel::update(target).set(placement).execute(connection),
    };
    let updated_count = result.map_err(|err| map_column_violation(err, column_id))?;
    if updated_count == 0 {
        return Err(BoardRepositoryError::TaskNotFound(task_id));
    }
    Ok(())
}

fn write_positions(
    connection: &mut PgConnection,
    updates: &[PositionUpdate],
) -> BoardRepositoryResult<()> {
    for update in updates {
        let updated_count = diesel::update(
            board_tasks::table.filter(board_tasks::id.eq(update.task_id.into_inner())),
        )
        .set(board_tasks::position.eq(update.position.value()))
        .execute(connection)?;
        if updated_count == 0 {
            return Err(BoardRepositoryError::TaskNotFound(update.task_id));
        }
    }
    Ok(())
}

fn map_column_violation(err: DieselError, column_id: ColumnId) -> BoardRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            BoardRepositoryError::ColumnNotFound(column_id)
        }
        other => BoardRepositoryError::persistence(other),
    }
}

fn to_new_column_row(column: &Column) -> NewColumnRow {
    NewColumnRow {
        id: column.id().into_inner(),
        title: column.title().as_str().to_owned(),
        position: column.position(),
        status: column.status().map(|status| status.as_str().to_owned()),
        created_at: column.created_at(),
        updated_at: column.updated_at(),
    }
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task
            .description()
            .map(|description| description.as_str().to_owned()),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        column_id: task.column_id().into_inner(),
        position: task.position().value(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_column(row: ColumnRow) -> BoardRepositoryResult<Column> {
    let ColumnRow {
        id,
        title,
        position,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let status = persisted_status
        .as_deref()
        .map(TaskStatus::try_from)
        .transpose()
        .map_err(BoardRepositoryError::persistence)?;

    Ok(Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(id),
        title: ColumnTitle::new(title).map_err(BoardRepositoryError::persistence)?,
        position,
        status,
        created_at,
        updated_at,
    }))
}

fn row_to_task(row: TaskRow) -> BoardRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        priority,
        status,
        column_id,
        position,
        created_at,
        updated_at,
    } = row;

    let details = TaskDetails {
        title: TaskTitle::new(title).map_err(BoardRepositoryError::persistence)?,
        description: description
            .map(TaskDescription::new)
            .transpose()
            .map_err(BoardRepositoryError::persistence)?
            .flatten(),
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(BoardRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(BoardRepositoryError::persistence)?,
    };

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        details,
        column_id: ColumnId::from_uuid(column_id),
        position: Position::new(position).map_err(BoardRepositoryError::persistence)?,
        created_at,
        updated_at,
    }))
}
