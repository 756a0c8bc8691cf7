//! Multi-step board flows over the in-memory repository.

use crate::in_memory::helpers::{
    TestActions, actions, assert_strictly_ordered, column_titles, find_task, load_board,
    move_between,
};
use rstest::rstest;
use taskboard::board::{domain::TaskStatus, services::seed_demo_board};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_board_has_three_status_columns(actions: TestActions) {
    seed_demo_board(actions.service()).await.expect("seed");

    let board = load_board(&actions).await;

    let layout: Vec<(&str, Option<TaskStatus>, usize)> = board
        .iter()
        .map(|entry| {
            (
                entry.column.title().as_str(),
                entry.column.status(),
                entry.tasks.len(),
            )
        })
        .collect();
    assert_eq!(
        layout,
        vec![
            ("To Do", Some(TaskStatus::Todo), 2),
            ("In Progress", Some(TaskStatus::InProgress), 2),
            ("Done", Some(TaskStatus::Done), 2),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_card_to_done_updates_status_and_order(actions: TestActions) {
    seed_demo_board(actions.service()).await.expect("seed");
    let board = load_board(&actions).await;
    let input = move_between(&board, "Setup authentication", "Done", 1).expect("known task");

    let response = actions.move_task(&input).await;

    assert!(response.success, "move failed: {:?}", response.error);
    let after = load_board(&actions).await;
    assert_eq!(
        column_titles(&after, "Done"),
        vec![
            "Fix navigation bug",
            "Setup authentication",
            "Implement dark mode"
        ]
    );
    assert_eq!(
        column_titles(&after, "In Progress"),
        vec!["API documentation"]
    );
    let moved = find_task(&after, "Setup authentication").expect("moved task");
    assert_eq!(moved.status(), TaskStatus::Done);
    assert!(moved.position().is_integral());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_moves_keep_every_column_strictly_ordered(actions: TestActions) {
    seed_demo_board(actions.service()).await.expect("seed");
    let script = [
        ("Research competitors", "Done", 0),
        ("Implement dark mode", "To Do", 0),
        ("API documentation", "To Do", 1),
        ("Design homepage", "In Progress", 0),
        ("Research competitors", "Done", 2),
        ("Fix navigation bug", "In Progress", 1),
        ("Implement dark mode", "To Do", 2),
        ("API documentation", "Done", 0),
    ];

    for (title, destination, index) in script {
        let board = load_board(&actions).await;
        let input = move_between(&board, title, destination, index).expect("known task");
        let response = actions.move_task(&input).await;
        assert!(response.success, "move of {title} failed: {:?}", response.error);
        assert_strictly_ordered(&load_board(&actions).await);
    }

    let board = load_board(&actions).await;
    let total: usize = board.iter().map(|entry| entry.tasks.len()).sum();
    assert_eq!(total, 6);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_disappears_from_the_board(actions: TestActions) {
    seed_demo_board(actions.service()).await.expect("seed");
    let board = load_board(&actions).await;
    let doomed = find_task(&board, "Design homepage")
        .expect("seeded task")
        .id()
        .to_string();

    let response = actions.delete_task(&doomed).await;

    assert_eq!(response.message.as_deref(), Some("Task deleted successfully"));
    let after = load_board(&actions).await;
    assert_eq!(column_titles(&after, "To Do"), vec!["Research competitors"]);
    assert!(!actions.get_task(&doomed).await.success);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_serializes_with_flattened_columns(actions: TestActions) {
    seed_demo_board(actions.service()).await.expect("seed");

    let response = actions.get_board().await;
    let json = serde_json::to_value(&response).expect("serializable board");

    assert_eq!(json["success"], true);
    assert_eq!(json["data"][0]["title"], "To Do");
    assert_eq!(json["data"][0]["status"], "todo");
    assert_eq!(json["data"][0]["tasks"][0]["title"], "Research competitors");
    assert_eq!(json["data"][0]["tasks"][0]["position"], 0.0);
}
