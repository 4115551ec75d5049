//! Command-line front end for the task board.
//!
//! Usage:
//!
//! ```text
//! taskboard [--user ID] [--data-dir DIR] [-v|-q] <command>
//! ```
//!
//! Each user's tasks live in `<data-dir>/tasks-<user>.json`. A user with no
//! stored tasks starts with three example tasks. `move` runs the same
//! drag-and-drop path as the board: the task is picked up and dropped on the
//! target column.

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::sync::Arc;
use taskboard::{
    board::{BoardProjection, DropOutcome, TaskSource, TransitionController},
    config::{ConfigError, TaskBoardConfig},
    task::{
        adapters::filesystem::FileKeyValueStore,
        domain::{
            OwnerId, Task, TaskDomainError, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle,
        },
        ports::{KeyValueStore, StorageError},
        services::{CreateTaskRequest, TaskStore, TaskStoreError},
    },
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter that overrides the
/// configured level.
const LOG_ENV: &str = "TASKBOARD_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    #[error("no user given; pass --user or set identity.user in the configuration")]
    MissingUser,
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Personal task board")]
struct Cli {
    /// User whose board is opened.
    #[arg(long, global = true)]
    user: Option<String>,
    /// Directory holding the stored boards.
    #[arg(long, global = true)]
    data_dir: Option<Utf8PathBuf>,
    /// Log debug events.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Log errors only.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tasks in insertion order.
    List {
        /// Only show tasks in this stage.
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Show the three board columns.
    Board,
    /// Create a task.
    Add(AddArgs),
    /// Change fields of a task.
    Update(UpdateArgs),
    /// Drag a task onto another column.
    Move {
        /// Task to move.
        id: String,
        /// Target stage.
        status: TaskStatus,
    },
    /// Delete a task permanently.
    Delete {
        /// Task to delete.
        id: String,
    },
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Task title.
    #[arg(long)]
    title: String,
    /// Task description.
    #[arg(long, default_value = "")]
    description: String,
    /// Priority level.
    #[arg(long, default_value = "medium")]
    priority: TaskPriority,
    /// Initial stage.
    #[arg(long, default_value = "todo")]
    status: TaskStatus,
    /// Due date (YYYY-MM-DD).
    #[arg(long)]
    due: Option<NaiveDate>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Task to change.
    id: String,
    /// New title.
    #[arg(long)]
    title: Option<String>,
    /// New description.
    #[arg(long)]
    description: Option<String>,
    /// New priority.
    #[arg(long)]
    priority: Option<TaskPriority>,
    /// New stage.
    #[arg(long)]
    status: Option<TaskStatus>,
    /// New due date (YYYY-MM-DD).
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<NaiveDate>,
    /// Remove the due date.
    #[arg(long)]
    clear_due: bool,
}

impl UpdateArgs {
    fn into_patch(self) -> Result<(TaskId, TaskPatch), TaskDomainError> {
        let id = TaskId::new(self.id)?;
        let mut patch = TaskPatch::new();
        if let Some(title) = self.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description {
            patch = patch.with_description(description);
        }
        if let Some(priority) = self.priority {
            patch = patch.with_priority(priority);
        }
        if let Some(status) = self.status {
            patch = patch.with_status(status);
        }
        if let Some(due) = self.due {
            patch = patch.with_due_date(due);
        }
        if self.clear_due {
            patch = patch.clearing_due_date();
        }
        Ok((id, patch))
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = TaskBoardConfig::load()?;
    init_tracing(&cli, &config)?;

    let owner = resolve_owner(cli.user.as_deref(), &config)?;
    let data_dir = cli.data_dir.unwrap_or(config.storage.data_dir);
    let storage = FileKeyValueStore::open(&data_dir)?;
    let clock = Arc::new(DefaultClock);
    let today = clock.utc().date_naive();
    let mut store = TaskStore::new(Arc::new(storage), clock);
    store.initialize(owner)?;

    let mut out = io::stdout().lock();
    execute(cli.command, &mut store, today, &mut out)
}

fn init_tracing(cli: &Cli, config: &TaskBoardConfig) -> Result<(), CliError> {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        config.log.level.as_str()
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn resolve_owner(user: Option<&str>, config: &TaskBoardConfig) -> Result<OwnerId, CliError> {
    match user {
        Some(raw) => Ok(OwnerId::new(raw)?),
        None => config.identity.owner()?.ok_or(CliError::MissingUser),
    }
}

fn execute<S, C>(
    command: Command,
    store: &mut TaskStore<S, C>,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    match command {
        Command::List { status } => {
            let tasks = status.map_or_else(|| store.list_all().to_vec(), |s| store.by_status(s));
            for task in &tasks {
                writeln!(out, "{}", task_line(task, today))?;
            }
        }
        Command::Board => render_board(&BoardProjection::new(&*store), today, out)?,
        Command::Add(args) => {
            let mut request = CreateTaskRequest::new(args.title, args.priority)
                .with_description(args.description)
                .with_status(args.status);
            if let Some(due) = args.due {
                request = request.with_due_date(due);
            }
            let task = store.create(request)?;
            writeln!(out, "created {}", task.id())?;
        }
        Command::Update(args) => {
            let (id, patch) = args.into_patch()?;
            let task = store.update(&id, patch)?;
            writeln!(out, "{}", task_line(&task, today))?;
        }
        Command::Move { id, status } => {
            let task_id = TaskId::new(id)?;
            let mut controller = TransitionController::new();
            controller.begin_drag(task_id.clone());
            match controller.complete_drop(store, &task_id, status)? {
                DropOutcome::Moved(task) => writeln!(out, "{}", task_line(&task, today))?,
                DropOutcome::Ignored => writeln!(out, "{task_id} not moved")?,
            }
        }
        Command::Delete { id } => {
            let task = store.delete(&TaskId::new(id)?)?;
            writeln!(out, "deleted {}", task.id())?;
        }
    }
    Ok(())
}

fn task_line(task: &Task, today: NaiveDate) -> String {
    let overdue = if task.is_overdue(today) { " OVERDUE" } else { "" };
    format!(
        "{}  [{}] {} ({}, due {}){overdue}",
        task.id(),
        task.status(),
        task.title(),
        task.priority(),
        task.due_date_label(),
    )
}

fn render_board<T: TaskSource + ?Sized>(
    projection: &BoardProjection<'_, T>,
    today: NaiveDate,
    out: &mut impl Write,
) -> io::Result<()> {
    let board = projection.board();
    for column in board.columns() {
        writeln!(out, "== {} ({}) ==", column.title(), column.len())?;
        if column.is_empty() {
            writeln!(out, "  No tasks yet")?;
        }
        for task in column.tasks() {
            writeln!(out, "  {}", task_line(task, today))?;
        }
    }
    Ok(())
}
