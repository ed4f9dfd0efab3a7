use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wiggum::error::Result;
use wiggum::manager::{TaskManager, TaskUpdate};
use wiggum::model::{Category, Status};
use wiggum::output::Format;
use wiggum::store::PrdStore;

#[derive(Parser)]
#[command(
    name = "task",
    version,
    about = "PRD-backed task tracker for agentic workflows"
)]
struct Cli {
    /// Path to the PRD document (falls back to $PRD_PATH, then plans/prd.json)
    #[arg(long, global = true)]
    prd: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty PRD document for a project
    Init {
        /// Project name
        project: String,
    },
    /// Add a new task to the backlog
    Add {
        /// Task description
        feature: String,
        /// Priority (lower = more urgent)
        #[arg(long, short, default_value_t = 3)]
        priority: i64,
        /// Category (inferred from the description when omitted)
        #[arg(long, value_enum)]
        category: Option<Category>,
        /// Task IDs this task depends on (comma-separated)
        #[arg(long = "depends-on", value_delimiter = ',')]
        depends_on: Vec<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List tasks (default: recently completed + ready tasks)
    List {
        /// Show all tasks sorted by priority
        #[arg(long)]
        all: bool,
        /// Filter by status
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by category
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Update fields of a task
    Update {
        /// Task ID to update
        id: String,
        /// New description
        #[arg(long)]
        feature: Option<String>,
        /// New priority
        #[arg(long, short)]
        priority: Option<i64>,
        /// New category
        #[arg(long, value_enum)]
        category: Option<Category>,
        /// New status (completing through here stamps manual provenance)
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Replace dependency list (comma-separated)
        #[arg(long = "depends-on", value_delimiter = ',')]
        depends_on: Option<Vec<String>>,
        /// Replace notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark a task completed (fails while any dependency is unfinished)
    Complete {
        /// Task ID to complete
        id: String,
    },
    /// Delete a task (dependents keep the dangling reference)
    Delete {
        /// Task ID to delete
        id: String,
    },
    /// Show status tallies and recent completions
    Status,
}

/// Explicit flag wins over the PRD_PATH environment variable, which wins
/// over the conventional default. The engine itself never reads the
/// environment.
fn resolve_prd_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Ok(from_env) = std::env::var("PRD_PATH")
        && !from_env.trim().is_empty()
    {
        return PathBuf::from(from_env);
    }
    PathBuf::from("plans/prd.json")
}

fn run(cli: Cli) -> Result<()> {
    let manager = TaskManager::new(PrdStore::new(resolve_prd_path(cli.prd)));
    let format = cli.format;

    match cli.command {
        Commands::Init { project } => wiggum::commands::init::run(&manager, &project, format),
        Commands::Add {
            feature,
            priority,
            category,
            depends_on,
            notes,
        } => wiggum::commands::add::run(
            &manager, feature, priority, category, depends_on, notes, format,
        ),
        Commands::List {
            all,
            status,
            category,
        } => wiggum::commands::list::run(&manager, all, status, category, format),
        Commands::Update {
            id,
            feature,
            priority,
            category,
            status,
            depends_on,
            notes,
        } => {
            let update = TaskUpdate {
                feature,
                priority,
                category,
                status,
                dependencies: depends_on,
                notes,
            };
            wiggum::commands::update::run(&manager, &id, update, format)
        }
        Commands::Complete { id } => wiggum::commands::complete::run(&manager, &id, format),
        Commands::Delete { id } => wiggum::commands::delete::run(&manager, &id, format),
        Commands::Status => wiggum::commands::status::run(&manager, format),
    }
}

fn main() {
    let cli = Cli::parse();
    let format = cli.format;
    if let Err(e) = run(cli) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            Format::Pretty => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let resolved = resolve_prd_path(Some(PathBuf::from("custom/prd.json")));
        assert_eq!(resolved, PathBuf::from("custom/prd.json"));
    }

    #[test]
    fn default_path_is_conventional() {
        // Only valid when PRD_PATH is unset in the test environment; the
        // CLI integration tests cover the env fallback.
        if std::env::var("PRD_PATH").is_err() {
            assert_eq!(resolve_prd_path(None), PathBuf::from("plans/prd.json"));
        }
    }
}
