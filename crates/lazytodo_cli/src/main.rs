//! Developer CLI over the LazyTodo core.
//!
//! # Responsibility
//! - Drive the same service the mobile app uses against a local database.
//! - Keep output deterministic for quick local sanity checks.

mod render;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use lazytodo_core::{
    default_log_level, init_logging, open_sqlite_service, parse_due_date, Priority,
    SqliteTodoService, StorageConfig, TodoDraft, TodoFilter, TodoId, TodoValidationError,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "lazytodo", version, about = "Manage the LazyTodo list from a terminal")]
struct Cli {
    /// Database file (defaults to LAZYTODO_DB_PATH, then the temp dir).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a todo at the top of the list.
    Add {
        text: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List todos, optionally filtered.
    List {
        /// Case-insensitive text search.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_priority_arg)]
        priority: Option<Priority>,
        /// Calendar day (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date_arg)]
        due: Option<NaiveDate>,
        #[arg(long, conflicts_with = "pending")]
        completed: bool,
        #[arg(long)]
        pending: bool,
    },
    /// List completed todos.
    Completed,
    /// Flip completion of one todo.
    Toggle { id: String },
    /// Replace text, priority and due date of one todo.
    Edit {
        id: String,
        text: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete one todo.
    Delete { id: String },
    /// Show total/completed/pending counts.
    Stats,
    /// Print core linkage info.
    Version,
}

#[derive(Debug, Args)]
struct FieldArgs {
    /// low|medium|high (default low).
    #[arg(long, value_parser = parse_priority_arg)]
    priority: Option<Priority>,
    /// Calendar day (YYYY-MM-DD); omitted means no due date.
    #[arg(long, value_parser = parse_date_arg)]
    due: Option<NaiveDate>,
}

impl FieldArgs {
    fn into_draft(self, text: String) -> TodoDraft {
        TodoDraft::new(text)
            .with_priority(self.priority.unwrap_or_default())
            .with_due_date(self.due)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    if let Command::Version = cli.command {
        println!("lazytodo_core ping={}", lazytodo_core::ping());
        println!("lazytodo_core version={}", lazytodo_core::core_version());
        return ExitCode::SUCCESS;
    }

    let mut config = StorageConfig::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }
    let mut service = match open_sqlite_service(&config) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("error: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    match run(&mut service, cli.command) {
        Ok(output) => {
            print!("{output}");
            if let Some(save_error) = service.last_save_error() {
                eprintln!("warning: changes kept in memory only: {save_error}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(service: &mut SqliteTodoService, command: Command) -> Result<String, TodoValidationError> {
    let output = match command {
        Command::Add { text, fields } => {
            let id = service.add(&fields.into_draft(text))?;
            format!("added {id}\n")
        }
        Command::List {
            search,
            priority,
            due,
            completed,
            pending,
        } => {
            let filter = TodoFilter {
                search_text: search,
                priority,
                due_date: due,
                completed: completion_filter(completed, pending),
            };
            render::render_list(&service.query(&filter))
        }
        Command::Completed => render::render_list(&service.completed()),
        Command::Toggle { id } => {
            let id = TodoId::parse(id)?;
            let found = service.get(&id).is_some();
            service.toggle_complete(&id);
            render::render_change("toggled", &id, found)
        }
        Command::Edit { id, text, fields } => {
            let id = TodoId::parse(id)?;
            let found = service.get(&id).is_some();
            service.edit(&id, &fields.into_draft(text))?;
            render::render_change("edited", &id, found)
        }
        Command::Delete { id } => {
            let id = TodoId::parse(id)?;
            let found = service.get(&id).is_some();
            service.delete(&id);
            render::render_change("deleted", &id, found)
        }
        Command::Stats => render::render_stats(&service.stats()),
        Command::Version => String::new(),
    };
    Ok(output)
}

fn completion_filter(completed: bool, pending: bool) -> Option<bool> {
    match (completed, pending) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn parse_priority_arg(value: &str) -> Result<Priority, String> {
    Priority::parse(value).map_err(|err| err.to_string())
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_due_date(value).map_err(|err| err.to_string())
}
