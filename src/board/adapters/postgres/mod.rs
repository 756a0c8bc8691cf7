//! `PostgreSQL` adapters for board persistence.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::{CREATE_BOARD_TABLES_SQL, apply_migrations};
pub use repository::{BoardPgPool, PostgresBoardRepository};
