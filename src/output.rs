use clap::ValueEnum;
use colored::{ColoredString, Colorize};

use crate::error::Result;
use crate::manager::StatusSummary;
use crate::model::{Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

fn status_label(status: Status) -> ColoredString {
    match status {
        Status::Pending => "pending".yellow(),
        Status::InProgress => "in_progress".cyan(),
        Status::Completed => "completed".green(),
    }
}

pub fn task_line(task: &Task) -> String {
    let mut line = format!(
        "#{} (P{}) [{}] {}",
        task.id, task.priority, task.category, task.feature
    );
    if let Some(completed_at) = task.completed_at {
        line.push_str(&format!(" (completed: {})", completed_at.format("%Y-%m-%d")));
    }
    if !task.dependencies.is_empty() {
        line.push_str(&format!(" [deps: {}]", task.dependencies.join(", ")));
    }
    line
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty => {
            println!("{} {}", status_label(task.status), task_line(task));
            if let Some(ref notes) = task.notes {
                println!("   └─ {notes}");
            }
        }
    }
    Ok(())
}

pub fn print_tasks(tasks: &[Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(tasks)?),
        Format::Pretty => {
            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }
            for task in tasks {
                print_task(task, Format::Pretty)?;
            }
        }
    }
    Ok(())
}

pub fn print_summary(summary: &StatusSummary, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(summary)?),
        Format::Pretty => {
            println!("{}", "Task summary".bold());
            println!(
                "Total: {} | Pending: {} | In progress: {} | Completed: {}",
                summary.total,
                summary.pending.to_string().yellow(),
                summary.in_progress.to_string().cyan(),
                summary.completed.to_string().green(),
            );
            if !summary.recently_completed.is_empty() {
                println!("\n{}", "Recently completed:".bold());
                for task in &summary.recently_completed {
                    println!("  {} {}", status_label(task.status), task_line(task));
                }
            }
        }
    }
    Ok(())
}

/// The default `task list` view: recent completions plus whatever is ready
/// to pick up, mirroring what the automation loop feeds its agent.
pub fn print_overview(recent: &[Task], ready: &[Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({
                "recently_completed": recent,
                "ready": ready,
            })
        ),
        Format::Pretty => {
            if recent.is_empty() && ready.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }
            if !recent.is_empty() {
                println!("{}", "Recently completed:".bold());
                for task in recent {
                    println!("  {} {}", status_label(task.status), task_line(task));
                }
            }
            if !ready.is_empty() {
                if !recent.is_empty() {
                    println!();
                }
                println!("{}", "Ready tasks (no pending dependencies):".bold());
                for task in ready {
                    println!("  {} {}", status_label(task.status), task_line(task));
                }
            } else {
                println!("\nNo ready tasks.");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use chrono::Utc;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task {
            id: id.into(),
            priority: 2,
            feature: "Ship it".into(),
            status: Status::Pending,
            category: Category::Feature,
            created_at: Utc::now(),
            completed_at: None,
            completed_by: None,
            dependencies: deps.iter().map(ToString::to_string).collect(),
            notes: None,
        }
    }

    #[test]
    fn task_line_includes_id_priority_and_category() {
        let line = task_line(&task("7", &[]));
        assert_eq!(line, "#7 (P2) [feature] Ship it");
    }

    #[test]
    fn task_line_appends_dependencies() {
        let line = task_line(&task("7", &["1", "2"]));
        assert!(line.ends_with("[deps: 1, 2]"));
    }

    #[test]
    fn task_line_shows_completion_date() {
        let mut t = task("7", &[]);
        t.status = Status::Completed;
        t.completed_at = Some("2026-03-04T05:06:07Z".parse().unwrap());
        assert!(task_line(&t).contains("(completed: 2026-03-04)"));
    }
}
