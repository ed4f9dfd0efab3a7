use crate::error::Result;
use crate::manager::TaskManager;
use crate::output::{self, Format};

pub fn run(manager: &TaskManager, format: Format) -> Result<()> {
    let summary = manager.status_summary()?;
    output::print_summary(&summary, format)
}
