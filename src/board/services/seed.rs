//! Demo board seeding.

use super::board::{
    BoardService, BoardServiceResult, CreateColumnRequest, CreateTaskRequest, TaskFields,
};
use crate::board::{
    domain::{TaskPriority, TaskStatus},
    ports::BoardRepository,
};
use mockable::Clock;
use tracing::info;

/// Counts of records written by [`seed_demo_board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Columns created.
    pub columns: usize,
    /// Tasks created.
    pub tasks: usize,
}

impl SeedSummary {
    /// Returns `true` when nothing was written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 && self.tasks == 0
    }
}

const DEMO_COLUMNS: [(&str, TaskStatus); 3] = [
    ("To Do", TaskStatus::Todo),
    ("In Progress", TaskStatus::InProgress),
    ("Done", TaskStatus::Done),
];

struct DemoTask {
    title: &'static str,
    description: &'static str,
    priority: TaskPriority,
    status: TaskStatus,
}

const DEMO_TASKS: [DemoTask; 6] = [
    DemoTask {
        title: "Research competitors",
        description: "Analyze top 5 competitors and their features",
        priority: TaskPriority::High,
        status: TaskStatus::Todo,
    },
    DemoTask {
        title: "Design homepage",
        description: "Create wireframes for the new homepage",
        priority: TaskPriority::Medium,
        status: TaskStatus::Todo,
    },
    DemoTask {
        title: "Setup authentication",
        description: "Implement user login and registration",
        priority: TaskPriority::High,
        status: TaskStatus::InProgress,
    },
    DemoTask {
        title: "API documentation",
        description: "Document all API endpoints for the frontend team",
        priority: TaskPriority::Low,
        status: TaskStatus::InProgress,
    },
    DemoTask {
        title: "Fix navigation bug",
        description: "Fix the dropdown menu bug in mobile view",
        priority: TaskPriority::Medium,
        status: TaskStatus::Done,
    },
    DemoTask {
        title: "Implement dark mode",
        description: "Add dark mode support to the application",
        priority: TaskPriority::Low,
        status: TaskStatus::Done,
    },
];

/// Populates an empty board with three status columns and six sample tasks.
///
/// A board that already has columns is left untouched and an empty summary
/// is returned.
///
/// # Errors
///
/// Returns service errors when a column or task cannot be created.
pub async fn seed_demo_board<R, C>(service: &BoardService<R, C>) -> BoardServiceResult<SeedSummary>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    if !service.list_columns().await?.is_empty() {
        info!("board already has columns; skipping seed");
        return Ok(SeedSummary {
            columns: 0,
            tasks: 0,
        });
    }

    let mut summary = SeedSummary {
        columns: 0,
        tasks: 0,
    };
    for (order, (title, status)) in (0_i32..).zip(DEMO_COLUMNS) {
        let column = service
            .create_column(CreateColumnRequest::new(title, order).with_status(status))
            .await?;
        summary.columns += 1;

        for demo in DEMO_TASKS.iter().filter(|demo| demo.status == status) {
            let fields = TaskFields::new(demo.title, demo.priority, demo.status)
                .with_description(demo.description);
            service
                .create_task(CreateTaskRequest::new(fields, column.id()))
                .await?;
            summary.tasks += 1;
        }
    }

    info!(
        columns = summary.columns,
        tasks = summary.tasks,
        "seeded demo board"
    );
    Ok(summary)
}
