use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WiggumError {
    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("task {task} is blocked by dependency {dependency} (missing or not completed)")]
    DependencyUnsatisfied { task: String, dependency: String },

    #[error("prd file not found at {} (run `task init` first)", .0.display())]
    PrdNotFound(PathBuf),

    #[error("prd file already exists at {}", .0.display())]
    PrdExists(PathBuf),

    #[error("agent command failed: {0}")]
    AgentFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WiggumError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskNotFound(_) => "task_not_found",
            Self::DependencyUnsatisfied { .. } => "dependency_unsatisfied",
            Self::PrdNotFound(_) => "prd_not_found",
            Self::PrdExists(_) => "prd_exists",
            Self::AgentFailed(_) => "agent_failed",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, WiggumError>;
