use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum Category {
    Infrastructure,
    #[default]
    Feature,
    Bugfix,
    Refactor,
    Docs,
}

/// Who (or what) marked a task completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletedBy {
    Manual,
    /// Completed by the automation loop's coding agent.
    #[serde(alias = "opencode")]
    Agent,
}

/// One unit of work in the backlog. Wire field names keep the camelCase
/// keys found in existing prd.json documents; `completedAt`, `completedBy`
/// and `notes` serialize as explicit `null` when unset, and deserialize
/// from either `null` or an absent key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub priority: i64,
    pub feature: String,
    pub status: Status,
    pub category: Category,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "completedAt", default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(rename = "completedBy", default)]
    pub completed_by: Option<CompletedBy>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The whole backlog document: the unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prd {
    pub project: String,
    pub backlog: Vec<Task>,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Feature => write!(f, "feature"),
            Self::Bugfix => write!(f, "bugfix"),
            Self::Refactor => write!(f, "refactor"),
            Self::Docs => write!(f, "docs"),
        }
    }
}

impl std::fmt::Display for CompletedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

impl Task {
    /// Trim dependency ids and drop empties and duplicates, preserving the
    /// order the caller supplied them in (order carries no meaning, but
    /// stable output keeps document diffs small).
    pub fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let mut kept = Vec::with_capacity(self.dependencies.len());
        for dep in self.dependencies.drain(..) {
            let trimmed = dep.trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                continue;
            }
            kept.push(trimmed.to_string());
        }
        self.dependencies = kept;
    }
}
