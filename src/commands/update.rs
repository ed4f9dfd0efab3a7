use crate::error::Result;
use crate::manager::{TaskManager, TaskUpdate};
use crate::output::{self, Format};

pub fn run(manager: &TaskManager, id: &str, update: TaskUpdate, format: Format) -> Result<()> {
    let task = manager.update_task(id, update)?;
    output::print_task(&task, format)
}
