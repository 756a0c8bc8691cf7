//! Embedded SQL migrations for the board schema.

use crate::board::ports::{BoardRepositoryError, BoardRepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// SQL creating the column and task tables.
pub const CREATE_BOARD_TABLES_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// Applies every board migration to the connected database.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when a statement fails.
pub fn apply_migrations(connection: &mut PgConnection) -> BoardRepositoryResult<()> {
    connection
        .batch_execute(CREATE_BOARD_TABLES_SQL)
        .map_err(BoardRepositoryError::persistence)
}
