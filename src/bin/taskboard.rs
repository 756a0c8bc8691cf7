//! Command-line client for a `PostgreSQL`-backed task board.
//!
//! Usage:
//!
//! ```text
//! taskboard [--database-url <url>] [--max-connections <n>] [-v...] <command>
//! ```
//!
//! Every board command prints the action's JSON response on stdout, for
//! example:
//!
//! ```json
//! { "success": true, "message": "Task moved successfully" }
//! ```
//!
//! The process exits non-zero when the response reports `success: false`.

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use taskboard::board::{
    adapters::postgres::{BoardPgPool, PostgresBoardRepository, apply_migrations},
    ports::BoardRepositoryError,
    services::{
        ActionResponse, BoardActions, BoardService, BoardServiceError, MoveTaskInput,
        TaskFormInput, seed_demo_board,
    },
};
use taskboard::config::{ConfigError, DEFAULT_MAX_CONNECTIONS, DatabaseConfig};
use taskboard::telemetry::init_tracing;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;

type Actions = BoardActions<PostgresBoardRepository, DefaultClock>;

/// Errors that stop the client before a response can be printed.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to check out a connection: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    #[error("migration failed: {0}")]
    Migration(#[source] BoardRepositoryError),
    #[error("seeding failed: {0}")]
    Seed(#[source] BoardServiceError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "Kanban board with drag-and-drop task ordering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// `PostgreSQL` connection URL
    #[arg(long, env = "DATABASE_URL", global = true, default_value = "")]
    database_url: String,

    /// Maximum pooled connections
    #[arg(
        long,
        env = "TASKBOARD_MAX_CONNECTIONS",
        global = true,
        default_value_t = DEFAULT_MAX_CONNECTIONS
    )]
    max_connections: u32,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the board tables if they do not exist
    Migrate,

    /// Populate an empty board with demo columns and tasks
    Seed,

    /// Print every column with its tasks
    Show,

    /// Print the board's columns
    Columns,

    /// Print tasks with the given status
    Tasks {
        /// Status: todo, in-progress, or done
        status: String,
    },

    /// Print one task
    Get {
        /// Task identifier
        task: String,
    },

    /// Create a task at the end of a column
    Create(TaskForm),

    /// Edit a task
    Update {
        /// Task identifier
        task: String,
        #[command(flatten)]
        form: TaskForm,
    },

    /// Delete a task
    Delete {
        /// Task identifier
        task: String,
    },

    /// Move a task within or between columns
    #[command(alias = "mv")]
    Move {
        /// Task identifier
        task: String,
        /// Column the task is currently in
        source: String,
        /// Column to drop the task into
        destination: String,
        /// Index of the task in the source column
        source_index: i64,
        /// Index among the destination column's other tasks
        destination_index: i64,
    },
}

#[derive(clap::Args, Debug)]
struct TaskForm {
    /// Task title
    #[arg(long)]
    title: String,

    /// Task description
    #[arg(long)]
    description: Option<String>,

    /// Priority: low, medium, or high
    #[arg(long, default_value = "medium")]
    priority: String,

    /// Status: todo, in-progress, or done
    #[arg(long, default_value = "todo")]
    status: String,

    /// Column identifier
    #[arg(long)]
    column: String,
}

impl From<TaskForm> for TaskFormInput {
    fn from(form: TaskForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            priority: form.priority,
            status: form.status,
            column_id: form.column,
        }
    }
}

fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config =
        DatabaseConfig::new(cli.database_url)?.with_max_connections(cli.max_connections)?;
    let pool = config.build_pool()?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;

    runtime.block_on(dispatch(cli.command, pool))
}

async fn dispatch(command: Command, pool: BoardPgPool) -> Result<ExitCode, CliError> {
    let actions: Actions = BoardActions::new(BoardService::new(
        Arc::new(PostgresBoardRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ));
    match command {
        Command::Migrate => migrate(&pool),
        Command::Seed => seed(&actions).await,
        Command::Show => emit(&actions.get_board().await),
        Command::Columns => emit(&actions.get_columns().await),
        Command::Tasks { status } => emit(&actions.get_tasks_by_status(&status).await),
        Command::Get { task } => emit(&actions.get_task(&task).await),
        Command::Create(form) => emit(&actions.create_task(form.into()).await),
        Command::Update { task, form } => emit(&actions.update_task(&task, form.into()).await),
        Command::Delete { task } => emit(&actions.delete_task(&task).await),
        Command::Move {
            task,
            source,
            destination,
            source_index,
            destination_index,
        } => {
            let input = MoveTaskInput {
                task_id: task,
                source_column_id: source,
                destination_column_id: destination,
                source_index,
                destination_index,
            };
            emit(&actions.move_task(&input).await)
        }
    }
}

fn migrate(pool: &BoardPgPool) -> Result<ExitCode, CliError> {
    let mut connection = pool.get()?;
    apply_migrations(&mut connection).map_err(CliError::Migration)?;
    info!("board tables ready");
    emit(&ActionResponse::<()>::confirmed("Migrations applied"))
}

async fn seed(actions: &Actions) -> Result<ExitCode, CliError> {
    let summary = seed_demo_board(actions.service())
        .await
        .map_err(CliError::Seed)?;
    let message = if summary.is_empty() {
        "Board already populated".to_owned()
    } else {
        format!(
            "Seeded {} columns and {} tasks",
            summary.columns, summary.tasks
        )
    };
    emit(&ActionResponse::<()>::confirmed(message))
}

fn emit<T: Serialize>(response: &ActionResponse<T>) -> Result<ExitCode, CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, response)?;
    writeln!(handle)?;
    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
