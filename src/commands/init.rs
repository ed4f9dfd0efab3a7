use colored::Colorize;

use crate::error::Result;
use crate::manager::TaskManager;
use crate::output::Format;

pub fn run(manager: &TaskManager, project: &str, format: Format) -> Result<()> {
    let prd = manager.store.init(project)?;
    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({
                "project": prd.project,
                "path": manager.store.path(),
            })
        ),
        Format::Pretty => println!(
            "{} initialized PRD for {} at {}",
            "ok".green().bold(),
            prd.project.bold(),
            manager.store.path().display()
        ),
    }
    Ok(())
}
