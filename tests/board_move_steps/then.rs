//! Then steps for drag-and-drop move scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::then;

#[then(r#"the move succeeds with message "{message}""#)]
fn move_succeeds(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move response in scenario world"))?;
    if !response.success {
        return Err(eyre::eyre!(
            "expected success, got error {:?}",
            response.error
        ));
    }
    if response.message.as_deref() != Some(message.as_str()) {
        return Err(eyre::eyre!(
            "expected message '{message}', got {:?}",
            response.message
        ));
    }
    Ok(())
}

#[then(r#"the move fails with error "{error}""#)]
fn move_fails(world: &BoardWorld, error: String) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move response in scenario world"))?;
    if response.success {
        return Err(eyre::eyre!("expected the move to fail"));
    }
    if response.error.as_deref() != Some(error.as_str()) {
        return Err(eyre::eyre!(
            "expected error '{error}', got {:?}",
            response.error
        ));
    }
    Ok(())
}

#[then(r#"column "{title}" reads "{expected}""#)]
fn column_reads(world: &BoardWorld, title: String, expected: String) -> Result<(), eyre::Report> {
    let column_id = world.column(&title)?.id();
    let tasks = run_async(world.actions.service().board())
        .map_err(|err| eyre::eyre!("board lookup failed: {err}"))?
        .into_iter()
        .find(|entry| entry.column.id() == column_id)
        .map(|entry| entry.tasks)
        .ok_or_else(|| eyre::eyre!("column '{title}' missing from board"))?;

    let actual = tasks
        .iter()
        .map(|task| format!("{}@{}", task.title(), task.position()))
        .collect::<Vec<_>>()
        .join(", ");
    if actual != expected {
        return Err(eyre::eyre!(
            "column '{title}' expected '{expected}', found '{actual}'"
        ));
    }
    Ok(())
}

#[then(r#"task "{task}" has status "{status}""#)]
fn task_has_status(world: &BoardWorld, task: String, status: String) -> Result<(), eyre::Report> {
    let task_id = world.task(&task)?.id();
    let stored = run_async(world.actions.service().get_task(task_id))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?;
    if stored.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected status '{status}', found '{}'",
            stored.status()
        ));
    }
    Ok(())
}
