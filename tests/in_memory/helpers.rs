//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{BoardColumn, Task},
    services::{BoardActions, BoardService, MoveTaskInput},
};

/// Action type used by the in-memory integration tests.
pub type TestActions = BoardActions<InMemoryBoardRepository, DefaultClock>;

/// Provides actions over a fresh in-memory board.
#[fixture]
pub fn actions() -> TestActions {
    BoardActions::new(BoardService::new(
        Arc::new(InMemoryBoardRepository::new()),
        Arc::new(DefaultClock),
    ))
}

/// Loads the whole board, failing the test when the action fails.
pub async fn load_board(actions: &TestActions) -> Vec<BoardColumn> {
    let response = actions.get_board().await;
    assert!(response.success, "board load failed: {:?}", response.error);
    response.data.unwrap_or_default()
}

/// Finds a task by title anywhere on the board.
pub fn find_task<'a>(board: &'a [BoardColumn], title: &str) -> Option<&'a Task> {
    board
        .iter()
        .flat_map(|entry| entry.tasks.iter())
        .find(|task| task.title().as_str() == title)
}

/// Finds a column by title.
pub fn find_column<'a>(board: &'a [BoardColumn], title: &str) -> Option<&'a BoardColumn> {
    board
        .iter()
        .find(|entry| entry.column.title().as_str() == title)
}

/// Returns the task titles of a column in display order.
pub fn column_titles(board: &[BoardColumn], title: &str) -> Vec<String> {
    find_column(board, title)
        .map(|entry| {
            entry
                .tasks
                .iter()
                .map(|task| task.title().as_str().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// Builds a move request for `task_title` into `destination` at `index`.
pub fn move_between(
    board: &[BoardColumn],
    task_title: &str,
    destination: &str,
    index: i64,
) -> Option<MoveTaskInput> {
    let task = find_task(board, task_title)?;
    let target = find_column(board, destination)?;
    Some(MoveTaskInput {
        task_id: task.id().to_string(),
        source_column_id: task.column_id().to_string(),
        destination_column_id: target.column.id().to_string(),
        source_index: 0,
        destination_index: index,
    })
}

/// Asserts every column's positions are strictly ascending.
pub fn assert_strictly_ordered(board: &[BoardColumn]) {
    for entry in board {
        for pair in entry.tasks.windows(2) {
            if let [lower, upper] = pair {
                assert!(
                    lower.position() < upper.position(),
                    "column '{}' has {} before {}",
                    entry.column.title(),
                    lower.position(),
                    upper.position()
                );
            }
        }
    }
}
