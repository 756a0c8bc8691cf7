//! Application services for board queries, task editing, and task moves.

mod actions;
mod board;
mod seed;

pub use actions::{ActionResponse, BoardActions, MoveTaskInput, TaskFormInput};
pub use board::{
    BoardService, BoardServiceError, BoardServiceResult, CreateColumnRequest, CreateTaskRequest,
    MoveOutcome, MoveTaskRequest, TaskFields, UpdateTaskRequest,
};
pub use seed::{SeedSummary, seed_demo_board};
