//! Domain-focused tests for board value types and task placement.

use crate::board::domain::{
    BoardDomainError, Column, ColumnId, ColumnTitle, ParseTaskPriorityError, ParseTaskStatusError,
    Position, Task, TaskDescription, TaskDetails, TaskId, TaskPriority, TaskStatus, TaskTitle,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn details(title: &str, status: TaskStatus) -> TaskDetails {
    TaskDetails {
        title: TaskTitle::new(title).expect("valid title"),
        description: None,
        priority: TaskPriority::Medium,
        status,
    }
}

#[rstest]
fn task_title_is_trimmed() {
    let title = TaskTitle::new("  Ship the release  ").expect("valid title");
    assert_eq!(title.as_str(), "Ship the release");
}

#[rstest]
#[case("")]
#[case("   \t")]
fn task_title_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(TaskTitle::new(raw), Err(BoardDomainError::EmptyTaskTitle));
}

#[rstest]
fn task_title_accepts_exactly_the_limit() {
    let raw = "a".repeat(TaskTitle::MAX_CHARS);
    assert!(TaskTitle::new(raw).is_ok());
}

#[rstest]
fn task_title_rejects_over_the_limit() {
    let raw = "é".repeat(TaskTitle::MAX_CHARS + 1);
    assert_eq!(
        TaskTitle::new(raw),
        Err(BoardDomainError::TaskTitleTooLong {
            max: TaskTitle::MAX_CHARS,
            actual: TaskTitle::MAX_CHARS + 1,
        })
    );
}

#[rstest]
fn blank_description_is_absent() {
    assert_eq!(TaskDescription::new("   "), Ok(None));
}

#[rstest]
fn long_description_is_rejected() {
    let raw = "x".repeat(TaskDescription::MAX_CHARS + 1);
    assert!(matches!(
        TaskDescription::new(raw),
        Err(BoardDomainError::TaskDescriptionTooLong { .. })
    ));
}

#[rstest]
#[case("low", TaskPriority::Low)]
#[case("Medium", TaskPriority::Medium)]
#[case(" HIGH ", TaskPriority::High)]
fn priority_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskPriority) {
    assert_eq!(TaskPriority::try_from(raw), Ok(expected));
}

#[rstest]
fn unknown_priority_is_rejected() {
    assert_eq!(
        TaskPriority::try_from("urgent"),
        Err(ParseTaskPriorityError("urgent".to_owned()))
    );
}

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case("in-progress", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
fn status_round_trips_through_storage_form(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
    assert_eq!(expected.as_str(), raw);
}

#[rstest]
fn display_title_is_not_a_status() {
    assert_eq!(
        TaskStatus::try_from("In Progress"),
        Err(ParseTaskStatusError("In Progress".to_owned()))
    );
}

#[rstest]
fn column_id_reports_missing_value() {
    assert_eq!(ColumnId::parse("  "), Err(BoardDomainError::MissingColumnId));
}

#[rstest]
fn malformed_ids_are_rejected() {
    assert_eq!(
        ColumnId::parse("column-1"),
        Err(BoardDomainError::InvalidColumnId("column-1".to_owned()))
    );
    assert_eq!(
        TaskId::parse("task-1"),
        Err(BoardDomainError::InvalidTaskId("task-1".to_owned()))
    );
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(-0.5)]
fn position_rejects_invalid_values(#[case] value: f64) {
    assert!(matches!(
        Position::new(value),
        Err(BoardDomainError::InvalidPosition(_))
    ));
}

#[rstest]
fn negative_zero_position_equals_zero() {
    assert_eq!(Position::new(-0.0), Ok(Position::ZERO));
}

#[rstest]
fn position_detects_fractional_values() {
    assert!(Position::new(3.0).expect("valid").is_integral());
    assert!(!Position::new(0.5).expect("valid").is_integral());
}

#[rstest]
fn column_title_rejects_blank_input(clock: DefaultClock) {
    assert_eq!(ColumnTitle::new(" "), Err(BoardDomainError::EmptyColumnTitle));
    let title = ColumnTitle::new("Backlog").expect("valid title");
    let column = Column::new(title, 0, None, &clock);
    assert_eq!(column.status(), None);
    assert_eq!(column.created_at(), column.updated_at());
}

#[rstest]
fn place_adopts_a_different_implied_status(clock: DefaultClock) {
    let mut task = Task::new(
        details("Write docs", TaskStatus::Todo),
        ColumnId::new(),
        Position::ZERO,
        &clock,
    );
    let destination = ColumnId::new();

    let changed = task.place(
        destination,
        Position::new(2.0).expect("valid"),
        Some(TaskStatus::Done),
        &clock,
    );

    assert_eq!(changed, Some(TaskStatus::Done));
    assert_eq!(task.status(), TaskStatus::Done);
    assert_eq!(task.column_id(), destination);
    assert!(task.updated_at() >= task.created_at());
}

#[rstest]
#[case(Some(TaskStatus::InProgress))]
#[case(None)]
fn place_reports_no_status_change_when_status_already_matches(
    clock: DefaultClock,
    #[case] implied: Option<TaskStatus>,
) {
    let mut task = Task::new(
        details("Review PR", TaskStatus::InProgress),
        ColumnId::new(),
        Position::ZERO,
        &clock,
    );

    let changed = task.place(ColumnId::new(), Position::ZERO, implied, &clock);

    assert_eq!(changed, None);
    assert_eq!(task.status(), TaskStatus::InProgress);
}

#[rstest]
fn reposition_keeps_timestamps(clock: DefaultClock) {
    let mut task = Task::new(
        details("Tidy", TaskStatus::Todo),
        ColumnId::new(),
        Position::new(0.5).expect("valid"),
        &clock,
    );
    let updated_at = task.updated_at();

    task.reposition(Position::new(1.0).expect("valid"));

    assert_eq!(task.position(), Position::new(1.0).expect("valid"));
    assert_eq!(task.updated_at(), updated_at);
}

#[rstest]
fn task_serializes_with_client_field_names(clock: DefaultClock) {
    let task = Task::new(
        details("Plan sprint", TaskStatus::InProgress),
        ColumnId::new(),
        Position::new(1.5).expect("valid"),
        &clock,
    );

    let value = serde_json::to_value(&task).expect("serializable task");

    assert_eq!(value["columnId"], task.column_id().to_string());
    assert_eq!(value["status"], "in-progress");
    assert_eq!(value["priority"], "medium");
    assert_eq!(value["position"], 1.5);
    assert!(value.get("createdAt").is_some());

    let decoded: Task = serde_json::from_value(value).expect("deserializable task");
    assert_eq!(decoded, task);
}

#[rstest]
fn task_deserialization_rejects_negative_position(clock: DefaultClock) {
    let task = Task::new(
        details("Plan sprint", TaskStatus::Todo),
        ColumnId::new(),
        Position::ZERO,
        &clock,
    );
    let mut value = serde_json::to_value(&task).expect("serializable task");
    value["position"] = serde_json::json!(-1.0);

    assert!(serde_json::from_value::<Task>(value).is_err());
}
