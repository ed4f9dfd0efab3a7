use crate::category::infer_category;
use crate::error::Result;
use crate::manager::TaskManager;
use crate::model::Category;
use crate::output::{self, Format};

pub fn run(
    manager: &TaskManager,
    feature: String,
    priority: i64,
    category: Option<Category>,
    dependencies: Vec<String>,
    notes: Option<String>,
    format: Format,
) -> Result<()> {
    let category = category.unwrap_or_else(|| infer_category(&feature));
    let task = manager.add_task(feature, priority, category, dependencies, notes)?;
    output::print_task(&task, format)
}
