//! Shared world state for drag-and-drop move scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, Task},
    services::{ActionResponse, BoardActions, BoardService},
};

/// Action type used by the BDD world.
pub type TestActions = BoardActions<InMemoryBoardRepository, DefaultClock>;

/// Scenario world for move behaviour tests.
pub struct BoardWorld {
    pub actions: TestActions,
    pub columns: HashMap<String, Column>,
    pub tasks: HashMap<String, Task>,
    pub last_response: Option<ActionResponse<()>>,
}

impl BoardWorld {
    /// Creates a world over an empty board.
    #[must_use]
    pub fn new() -> Self {
        let service = BoardService::new(
            Arc::new(InMemoryBoardRepository::new()),
            Arc::new(DefaultClock),
        );
        Self {
            actions: BoardActions::new(service),
            columns: HashMap::new(),
            tasks: HashMap::new(),
            last_response: None,
        }
    }

    /// Looks up a column created earlier in the scenario.
    pub fn column(&self, title: &str) -> Result<&Column, eyre::Report> {
        self.columns
            .get(title)
            .ok_or_else(|| eyre::eyre!("unknown column '{title}' in scenario world"))
    }

    /// Looks up a task created earlier in the scenario.
    pub fn task(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.tasks
            .get(title)
            .ok_or_else(|| eyre::eyre!("unknown task '{title}' in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
