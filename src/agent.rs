use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use crate::error::{Result, WiggumError};
use crate::manager::TaskManager;
use crate::model::Task;
use crate::output;
use crate::store::PrdStore;

/// Sentinel the agent emits when no workable task remains.
pub const COMPLETE_SENTINEL: &str = "<promise>COMPLETE</promise>";

pub const DEFAULT_AGENT_CMD: &str = "opencode run -m opencode/glm-4.7-free";
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

const ITERATION_PAUSE: Duration = Duration::from_secs(1);

/// Configuration for one run of the automation loop. The loop never
/// mutates the backlog itself; the spawned agent calls back through the
/// `task` CLI, which serializes activity by construction.
pub struct LoopConfig {
    pub prd_path: PathBuf,
    pub log_path: PathBuf,
    pub max_iterations: u32,
    pub agent_cmd: Vec<String>,
}

/// Split an agent command string into argv. The generated prompt is
/// appended as the final argument.
pub fn parse_agent_cmd(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(ToString::to_string).collect()
}

/// Plain-text listing handed to the agent: recent completions for context,
/// ready tasks to choose from.
pub fn render_listing(recent: &[Task], ready: &[Task]) -> String {
    let mut out = String::new();
    if !recent.is_empty() {
        out.push_str("Recently completed:\n");
        for task in recent {
            out.push_str(&format!("  {}\n", output::task_line(task)));
        }
        out.push('\n');
    }
    out.push_str("Ready tasks (no pending dependencies):\n");
    for task in ready {
        out.push_str(&format!("  {}\n", output::task_line(task)));
    }
    out
}

pub fn build_prompt(log_path: &Path, listing: &str) -> String {
    let log = log_path.display();
    format!(
        "Context: @{log}\n\
         \n\
         Tasks:\n\
         {listing}\n\
         CRITICAL: You are in an automated loop. Complete exactly ONE task, then STOP. \
         Do NOT check for more work. Do NOT continue to the next task. \
         Let the loop restart you in a fresh session.\n\
         \n\
         Task:\n\
         1. Choose the highest priority task from the ready tasks list.\n\
         2. If it is environment setup, perform it now (install deps, config files).\n\
         3. For any feature, verify with the project's build and test commands.\n\
         4. If successful:\n\
         \x20  - Mark the task as complete by running 'task complete <id>'.\n\
         \x20  - Record details in {log}.\n\
         \x20  - Create a git commit.\n\
         \x20  - STOP HERE. Do not check for tasks again. Do not look for the next task.\n\
         5. If there are no available tasks to work on, respond with: {COMPLETE_SENTINEL}\n\
         \n\
         After completing one task, report completion with a brief summary. \
         Do not check for tasks again. The loop will call you again.\n"
    )
}

fn invoke_agent(cmd: &[String], prompt: &str) -> Result<String> {
    let (program, args) = cmd
        .split_first()
        .ok_or_else(|| WiggumError::AgentFailed("empty agent command".into()))?;
    let output = Command::new(program).args(args).arg(prompt).output()?;
    if !output.status.success() {
        return Err(WiggumError::AgentFailed(format!(
            "{program} exited with {}",
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Drive the agent until the backlog is exhausted or the iteration cap is
/// hit. One agent invocation per iteration, strictly sequential.
pub fn run_loop(config: &LoopConfig) -> Result<()> {
    println!(
        "{} wiggum loop: {} ({} iteration cap)",
        "::".cyan().bold(),
        config.prd_path.display(),
        config.max_iterations
    );

    for iteration in 1..=config.max_iterations {
        println!("\n--- iteration {iteration} ---");

        let manager = TaskManager::new(PrdStore::new(config.prd_path.clone()));
        let summary = manager.status_summary()?;
        let ready = manager.ready_tasks()?;

        if ready.is_empty() {
            if summary.pending == 0 && summary.in_progress == 0 {
                println!("{} all tasks completed", "done".green().bold());
            } else {
                println!(
                    "{} no ready tasks ({} pending blocked, {} in progress)",
                    "stop".yellow().bold(),
                    summary.pending,
                    summary.in_progress
                );
            }
            return Ok(());
        }

        let listing = render_listing(&summary.recently_completed, &ready);
        let prompt = build_prompt(&config.log_path, &listing);
        let result = invoke_agent(&config.agent_cmd, &prompt)?;
        println!("{result}");

        if result.contains(COMPLETE_SENTINEL) {
            println!("{} PRD fully implemented", "done".green().bold());
            return Ok(());
        }

        thread::sleep(ITERATION_PAUSE);
    }

    println!("iteration cap reached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Status};
    use chrono::Utc;

    fn task(id: &str, priority: i64) -> Task {
        Task {
            id: id.into(),
            priority,
            feature: format!("Task {id}"),
            status: Status::Pending,
            category: Category::Feature,
            created_at: Utc::now(),
            completed_at: None,
            completed_by: None,
            dependencies: vec![],
            notes: None,
        }
    }

    #[test]
    fn parse_agent_cmd_splits_on_whitespace() {
        let cmd = parse_agent_cmd(DEFAULT_AGENT_CMD);
        assert_eq!(cmd, vec!["opencode", "run", "-m", "opencode/glm-4.7-free"]);
    }

    #[test]
    fn prompt_references_log_and_sentinel() {
        let listing = render_listing(&[], &[task("1", 1)]);
        let prompt = build_prompt(Path::new("progress.txt"), &listing);
        assert!(prompt.contains("Context: @progress.txt"));
        assert!(prompt.contains(COMPLETE_SENTINEL));
        assert!(prompt.contains("exactly ONE task"));
        assert!(prompt.contains("#1 (P1) [feature] Task 1"));
    }

    #[test]
    fn listing_skips_recent_section_when_empty() {
        let listing = render_listing(&[], &[task("1", 1)]);
        assert!(!listing.contains("Recently completed"));
        assert!(listing.starts_with("Ready tasks"));
    }

    #[test]
    fn invoke_agent_rejects_empty_command() {
        let err = invoke_agent(&[], "prompt").unwrap_err();
        assert!(matches!(err, WiggumError::AgentFailed(_)));
    }
}
