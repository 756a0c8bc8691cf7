//! Taskboard: a kanban board with drag-and-drop task ordering.
//!
//! Tasks are grouped into columns and ordered by a fractional position, so a
//! drag-and-drop move usually rewrites a single row. When a move leaves a
//! fractional or colliding position, the destination column is rewritten to
//! consecutive integer positions in the same atomic write as the move.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`board`]: Columns, tasks, the reorder engine, and board actions
//! - [`config`]: Database connection settings
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod telemetry;
