use crate::error::Result;
use crate::manager::TaskManager;
use crate::output::{self, Format};

pub fn run(manager: &TaskManager, id: &str, format: Format) -> Result<()> {
    let task = manager.complete_task(id)?;
    output::print_task(&task, format)
}
