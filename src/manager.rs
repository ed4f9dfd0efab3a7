use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;

use crate::error::{Result, WiggumError};
use crate::model::{Category, CompletedBy, Prd, Status, Task};
use crate::store::PrdStore;

/// Fields of a partial task update. `None` means "leave unchanged".
#[derive(Debug, Default, Clone)]
pub struct TaskUpdate {
    pub feature: Option<String>,
    pub priority: Option<i64>,
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub dependencies: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub recently_completed: Vec<Task>,
}

/// The backlog engine. Every operation is one load -> compute -> save cycle
/// against the whole document; a failed operation never partially persists.
pub struct TaskManager {
    pub store: PrdStore,
}

impl TaskManager {
    pub fn new(store: PrdStore) -> Self {
        Self { store }
    }

    /// Next id is max numeric id + 1, rendered as a decimal string.
    /// Non-numeric ids (hand-edited documents) count as 0.
    fn next_id(backlog: &[Task]) -> String {
        let max = backlog
            .iter()
            .map(|t| t.id.parse::<u64>().unwrap_or(0))
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    pub fn add_task(
        &self,
        feature: String,
        priority: i64,
        category: Category,
        dependencies: Vec<String>,
        notes: Option<String>,
    ) -> Result<Task> {
        let mut prd = self.store.load()?;
        let mut task = Task {
            id: Self::next_id(&prd.backlog),
            priority,
            feature,
            status: Status::Pending,
            category,
            created_at: Utc::now(),
            completed_at: None,
            completed_by: None,
            dependencies,
            notes,
        };
        task.normalize();
        prd.backlog.push(task.clone());
        self.store.save(&prd)?;
        Ok(task)
    }

    /// Tasks matching the optional filters, ascending by priority. The sort
    /// is stable: equal priorities keep their document order.
    pub fn list_tasks(
        &self,
        status: Option<Status>,
        category: Option<Category>,
    ) -> Result<Vec<Task>> {
        let prd = self.store.load()?;
        let mut tasks: Vec<Task> = prd
            .backlog
            .into_iter()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .filter(|t| category.is_none_or(|c| t.category == c))
            .collect();
        tasks.sort_by_key(|t| t.priority);
        Ok(tasks)
    }

    /// Apply the present fields of `update` to a task. A status change into
    /// `completed` stamps the completion metadata; a change to any other
    /// status clears it; an update without a status leaves it untouched.
    pub fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task> {
        let mut prd = self.store.load()?;
        let task = prd
            .backlog
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| WiggumError::TaskNotFound(id.to_string()))?;

        if let Some(feature) = update.feature {
            task.feature = feature;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(category) = update.category {
            task.category = category;
        }
        if let Some(status) = update.status {
            if status == Status::Completed && task.status != Status::Completed {
                task.completed_at = Some(Utc::now());
                task.completed_by = Some(CompletedBy::Manual);
            } else if status != Status::Completed {
                task.completed_at = None;
                task.completed_by = None;
            }
            task.status = status;
        }
        if let Some(dependencies) = update.dependencies {
            task.dependencies = dependencies;
        }
        if let Some(notes) = update.notes {
            task.notes = Some(notes);
        }
        task.normalize();

        let updated = task.clone();
        self.store.save(&prd)?;
        Ok(updated)
    }

    /// Mark a task completed with manual provenance. Fails without touching
    /// the document if any dependency is dangling or not yet completed.
    pub fn complete_task(&self, id: &str) -> Result<Task> {
        self.complete_task_as(id, CompletedBy::Manual)
    }

    pub fn complete_task_as(&self, id: &str, by: CompletedBy) -> Result<Task> {
        let mut prd = self.store.load()?;
        let index = prd
            .backlog
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| WiggumError::TaskNotFound(id.to_string()))?;

        for dep in &prd.backlog[index].dependencies {
            let satisfied = prd
                .backlog
                .iter()
                .any(|t| t.id == *dep && t.status == Status::Completed);
            if !satisfied {
                return Err(WiggumError::DependencyUnsatisfied {
                    task: id.to_string(),
                    dependency: dep.clone(),
                });
            }
        }

        let task = &mut prd.backlog[index];
        task.status = Status::Completed;
        task.completed_at = Some(Utc::now());
        task.completed_by = Some(by);

        let completed = task.clone();
        self.store.save(&prd)?;
        Ok(completed)
    }

    /// Remove a task permanently. No cascade: tasks depending on the
    /// deleted id keep the now-dangling reference and can never satisfy it.
    pub fn delete_task(&self, id: &str) -> Result<Task> {
        let mut prd = self.store.load()?;
        let index = prd
            .backlog
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| WiggumError::TaskNotFound(id.to_string()))?;
        let deleted = prd.backlog.remove(index);
        self.store.save(&prd)?;
        Ok(deleted)
    }

    /// Status tallies plus the 5 most recently completed tasks, newest
    /// first.
    pub fn status_summary(&self) -> Result<StatusSummary> {
        let prd = self.store.load()?;
        let pending = count_status(&prd, Status::Pending);
        let in_progress = count_status(&prd, Status::InProgress);
        let completed = count_status(&prd, Status::Completed);

        let mut recently_completed: Vec<Task> = prd
            .backlog
            .iter()
            .filter(|t| t.status == Status::Completed && t.completed_at.is_some())
            .cloned()
            .collect();
        recently_completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        recently_completed.truncate(5);

        Ok(StatusSummary {
            total: prd.backlog.len(),
            pending,
            in_progress,
            completed,
            recently_completed,
        })
    }

    /// Pending tasks whose every dependency id resolves to a completed
    /// task, ascending by priority. A dangling dependency keeps its task
    /// out of this list permanently.
    pub fn ready_tasks(&self) -> Result<Vec<Task>> {
        let prd = self.store.load()?;
        let completed_ids: HashSet<&str> = prd
            .backlog
            .iter()
            .filter(|t| t.status == Status::Completed)
            .map(|t| t.id.as_str())
            .collect();

        let mut ready: Vec<Task> = prd
            .backlog
            .iter()
            .filter(|t| {
                t.status == Status::Pending
                    && t.dependencies
                        .iter()
                        .all(|dep| completed_ids.contains(dep.as_str()))
            })
            .cloned()
            .collect();
        ready.sort_by_key(|t| t.priority);
        Ok(ready)
    }
}

fn count_status(prd: &Prd, status: Status) -> usize {
    prd.backlog.iter().filter(|t| t.status == status).count()
}
