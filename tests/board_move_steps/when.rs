//! When steps for drag-and-drop move scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::services::MoveTaskInput;

fn submit_move(
    world: &mut BoardWorld,
    task: &str,
    source: &str,
    destination: &str,
    index: u64,
) -> Result<(), eyre::Report> {
    let destination_index = i64::try_from(index).wrap_err("destination index")?;
    let input = MoveTaskInput {
        task_id: world.task(task)?.id().to_string(),
        source_column_id: world.column(source)?.id().to_string(),
        destination_column_id: world.column(destination)?.id().to_string(),
        source_index: 0,
        destination_index,
    };
    world.last_response = Some(run_async(world.actions.move_task(&input)));
    Ok(())
}

#[when(r#"task "{task}" is moved to column "{destination}" at index {index:u64}"#)]
fn move_task(
    world: &mut BoardWorld,
    task: String,
    destination: String,
    index: u64,
) -> Result<(), eyre::Report> {
    let source = world
        .columns
        .iter()
        .find(|(_, column)| {
            world
                .tasks
                .get(&task)
                .is_some_and(|stored| stored.column_id() == column.id())
        })
        .map(|(title, _)| title.clone())
        .ok_or_else(|| eyre::eyre!("task '{task}' has no known column"))?;
    submit_move(world, &task, &source, &destination, index)
}

#[when(
    r#"task "{task}" is moved from column "{source}" to column "{destination}" at index {index:u64}"#
)]
fn move_task_from(
    world: &mut BoardWorld,
    task: String,
    source: String,
    destination: String,
    index: u64,
) -> Result<(), eyre::Report> {
    submit_move(world, &task, &source, &destination, index)
}
