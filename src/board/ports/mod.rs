//! Port contracts for the board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;

pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult, TaskMove};

#[cfg(test)]
pub use repository::MockBoardRepository;
