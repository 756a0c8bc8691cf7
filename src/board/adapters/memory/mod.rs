//! In-memory adapters for board persistence.

mod repository;

pub use repository::InMemoryBoardRepository;
