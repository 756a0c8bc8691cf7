//! Domain model for the kanban board.
//!
//! Columns hold tasks ordered by a fractional [`Position`]. The reorder
//! engine in [`reorder`] decides where a dragged task lands; persistence and
//! orchestration live outside this module.

mod column;
mod error;
mod ids;
mod position;
pub mod reorder;
mod task;

pub use column::{BoardColumn, Column, ColumnTitle, PersistedColumnData};
pub use error::{BoardDomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{ColumnId, TaskId};
pub use position::Position;
pub use reorder::{
    MovePlacement, PositionUpdate, Renumbering, append_position, compute_move, renormalize,
    renumber_move,
};
pub use task::{
    PersistedTaskData, Task, TaskDescription, TaskDetails, TaskPriority, TaskStatus, TaskTitle,
};
