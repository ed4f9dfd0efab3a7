use crate::error::Result;
use crate::manager::TaskManager;
use crate::model::{Category, Status};
use crate::output::{self, Format};

/// With no flags the listing shows the same view the automation loop gives
/// its agent: recent completions plus the ready tasks. Any filter (or
/// `--all`) switches to the flat priority-sorted listing.
pub fn run(
    manager: &TaskManager,
    all: bool,
    status: Option<Status>,
    category: Option<Category>,
    format: Format,
) -> Result<()> {
    if all || status.is_some() || category.is_some() {
        let tasks = manager.list_tasks(status, category)?;
        output::print_tasks(&tasks, format)
    } else {
        let summary = manager.status_summary()?;
        let ready = manager.ready_tasks()?;
        output::print_overview(&summary.recently_completed, &ready, format)
    }
}
