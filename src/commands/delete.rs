use colored::Colorize;

use crate::error::Result;
use crate::manager::TaskManager;
use crate::output::Format;

pub fn run(manager: &TaskManager, id: &str, format: Format) -> Result<()> {
    let task = manager.delete_task(id)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string(&task)?),
        Format::Pretty => println!("{} deleted #{} {}", "ok".green().bold(), task.id, task.feature),
    }
    Ok(())
}
