//! Command-line presentation layer for `taskpad_core`.
//!
//! # Responsibility
//! - Translate user commands into task store calls.
//! - Ask for confirmation before destructive bulk operations.
//! - Render the view pipeline output as plain text.

mod render;

use clap::{Args, Parser, Subcommand};
use directories::ProjectDirs;
use log::info;
use std::error::Error;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use taskpad_core::storage::open_db;
use taskpad_core::{
    core_version, default_log_level, init_logging, CategoryFilter, KeyValueSlot, LogLevel, MemorySlot,
    SortMode, SqliteSlot, StatusFilter, TaskStore, ViewQuery, DEFAULT_CATEGORY,
};

const DB_FILE_NAME: &str = "taskpad.db";

#[derive(Debug, Parser)]
#[command(
    name = "taskpad",
    version,
    long_version = core_version(),
    about = "A small persistent task list"
)]
struct Cli {
    /// Directory holding the task database and logs.
    #[arg(long, env = "TASKPAD_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TASKPAD_LOG", global = true)]
    log_level: Option<String>,

    /// Keep tasks in memory only; nothing is persisted.
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task.
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },
    /// Show tasks, filtered and sorted.
    List(ListArgs),
    /// Flip a task between active and completed.
    Toggle { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Delete every completed task.
    ClearCompleted {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show total/completed/active counts.
    Stats,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List(_) => "list",
            Self::Toggle { .. } => "toggle",
            Self::Delete { .. } => "delete",
            Self::ClearCompleted { .. } => "clear_completed",
            Self::Stats => "stats",
        }
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    /// all|active|completed
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    /// `all` or a category tag.
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
    /// Case-insensitive text matched against title and description.
    #[arg(long, default_value = "")]
    search: String,
    /// created-desc|created-asc
    #[arg(long, default_value = "created-desc")]
    sort: SortMode,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let level = match cli.log_level.as_deref() {
        Some(value) => value.parse::<LogLevel>()?,
        None => default_log_level(),
    };
    if let Err(err) = init_logging(level, &data_dir.join("logs")) {
        eprintln!("warning: logging disabled: {err}");
    }

    let slot: Box<dyn KeyValueSlot> = if cli.memory {
        Box::new(MemorySlot::new())
    } else {
        Box::new(SqliteSlot::new(open_db(data_dir.join(DB_FILE_NAME))?))
    };
    let mut store = TaskStore::load(slot);
    info!(
        "event=cli_command module=cli status=start command={} memory={}",
        cli.command.name(),
        cli.memory
    );

    match cli.command {
        Command::Add {
            title,
            description,
            category,
        } => match store.create(&title, &description, &category) {
            Ok(task) => {
                println!("added {}", render::task_line(&task));
                if let Some(hint) = render::custom_category_hint(task.category()) {
                    println!("{hint}");
                }
            }
            Err(err) if err.is_empty_title() => {
                eprintln!("please enter a task title");
                return Ok(ExitCode::from(2));
            }
            Err(err) => return Err(err.into()),
        },
        Command::List(args) => {
            let query = ViewQuery {
                status: args.status,
                category: args.category,
                search: args.search,
                sort: args.sort,
            };
            print!("{}", render::view(&store.compute_view(&query)));
        }
        Command::Toggle { id } => match store.toggle_completion(&id)? {
            Some(true) => println!("completed {id}"),
            Some(false) => println!("reopened {id}"),
            None => println!("no task with id {id}"),
        },
        Command::Delete { id } => {
            let existed = store.get(&id).is_some();
            store.delete(&id)?;
            if existed {
                println!("deleted {id}");
            } else {
                println!("no task with id {id}");
            }
        }
        Command::ClearCompleted { yes } => {
            let stdin = std::io::stdin();
            clear_completed(&mut store, yes, &mut stdin.lock(), &mut std::io::stdout())?;
        }
        Command::Stats => println!("{}", render::counts(&store.counts())),
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
    let dir = match explicit {
        Some(dir) => dir,
        None => ProjectDirs::from("", "", "taskpad")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or("cannot determine a data directory; pass --data-dir")?,
    };
    absolutize(&dir)
}

fn absolutize(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

/// Clears completed tasks only after an explicit `y`/`yes`, unless `yes`
/// was passed on the command line.
fn clear_completed<S: KeyValueSlot>(
    store: &mut TaskStore<S>,
    yes: bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    if yes || confirm("Clear all completed tasks?", input, output)? {
        let removed = store.clear_completed()?;
        writeln!(output, "cleared {removed} completed task(s)")?;
    } else {
        writeln!(output, "nothing cleared")?;
    }
    Ok(())
}

fn confirm(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> std::io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::{clear_completed, Cli, Command};
    use clap::{CommandFactory, Parser};
    use taskpad_core::{CategoryFilter, MemorySlot, SortMode, StatusFilter, TaskStore};

    fn store_with_one_completed() -> TaskStore<MemorySlot> {
        let mut store = TaskStore::load(MemorySlot::new());
        store.create("open", "", "work").unwrap();
        let done = store.create("done", "", "work").unwrap();
        store.toggle_completion(done.id()).unwrap();
        store
    }

    fn run_clear(store: &mut TaskStore<MemorySlot>, yes: bool, answer: &str) -> String {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        clear_completed(store, yes, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn clear_completed_keeps_tasks_unless_confirmed() {
        for answer in ["", "\n", "n\n", "no\n", "maybe\n"] {
            let mut store = store_with_one_completed();
            let out = run_clear(&mut store, false, answer);

            assert!(out.starts_with("Clear all completed tasks? [y/N] "));
            assert!(out.ends_with("nothing cleared\n"));
            assert_eq!(store.counts().completed, 1, "answer {answer:?}");
        }
    }

    #[test]
    fn clear_completed_runs_after_confirmation() {
        for answer in ["y\n", "YES\n", " yes \n"] {
            let mut store = store_with_one_completed();
            let out = run_clear(&mut store, false, answer);

            assert!(out.ends_with("cleared 1 completed task(s)\n"));
            assert_eq!(store.counts().total, 1, "answer {answer:?}");
            assert_eq!(store.counts().completed, 0);
        }
    }

    #[test]
    fn clear_completed_with_yes_flag_skips_prompt() {
        let mut store = store_with_one_completed();
        let out = run_clear(&mut store, true, "");

        assert_eq!(out, "cleared 1 completed task(s)\n");
        assert_eq!(store.counts().completed, 0);
    }

    #[test]
    fn list_defaults_match_view_defaults() {
        let cli = Cli::try_parse_from(["taskpad", "list"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.status, StatusFilter::All);
        assert_eq!(args.category, CategoryFilter::All);
        assert_eq!(args.sort, SortMode::CreatedDesc);
        assert!(args.search.is_empty());
    }

    #[test]
    fn long_version_reports_core_version() {
        let command = Cli::command();
        assert_eq!(command.get_long_version(), Some(taskpad_core::core_version()));
    }

    #[test]
    fn rejects_unknown_sort_mode() {
        assert!(Cli::try_parse_from(["taskpad", "list", "--sort", "newest"]).is_err());
    }

    #[test]
    fn add_uses_default_category() {
        let cli = Cli::try_parse_from(["taskpad", "--memory", "add", "Write report"]).unwrap();
        assert!(cli.memory);
        match cli.command {
            Command::Add { title, category, .. } => {
                assert_eq!(title, "Write report");
                assert_eq!(category, "work");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
