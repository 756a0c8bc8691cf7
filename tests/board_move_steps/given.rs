//! Given steps for drag-and-drop move scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    domain::{TaskPriority, TaskStatus},
    services::{CreateColumnRequest, CreateTaskRequest, TaskFields},
};

fn add_column(world: &mut BoardWorld, title: &str, status: &str) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status).wrap_err("parse column status")?;
    let order = i32::try_from(world.columns.len()).wrap_err("column order")?;
    let column = run_async(
        world
            .actions
            .service()
            .create_column(CreateColumnRequest::new(title, order).with_status(parsed)),
    )
    .wrap_err("create column")?;
    world.columns.insert(title.to_owned(), column);
    Ok(())
}

#[given(r#"a column "{title}" with status "{status}" holding tasks "{tasks}""#)]
fn column_with_tasks(
    world: &mut BoardWorld,
    title: String,
    status: String,
    tasks: String,
) -> Result<(), eyre::Report> {
    add_column(world, &title, &status)?;
    let column = world.column(&title)?.clone();
    let task_status = column.status().unwrap_or(TaskStatus::Todo);

    for task_title in tasks.split(',').map(str::trim) {
        let fields = TaskFields::new(task_title, TaskPriority::Medium, task_status);
        let task = run_async(
            world
                .actions
                .service()
                .create_task(CreateTaskRequest::new(fields, column.id())),
        )
        .wrap_err_with(|| format!("create task '{task_title}'"))?;
        world.tasks.insert(task_title.to_owned(), task);
    }
    Ok(())
}

#[given(r#"an empty column "{title}" with status "{status}""#)]
fn empty_column(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    add_column(world, &title, &status)
}
