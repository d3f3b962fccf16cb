use std::fmt;

use serde::{Deserialize, Serialize};

/// Engine-owned lifecycle of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Informational weight of a task. Dispatch is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    SimpleAction,
    AgenticAction,
}

/// How the executor reacts to a failed tool call while budget remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStrategy {
    /// Ask the planner for a corrective fragment, falling back to a plain retry
    /// once the per-run replan cap is reached.
    #[default]
    Replan,
    /// Re-run the same task unchanged.
    Retry,
}

/// How a single plan execution ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The terminal tool completed; `response` is its result.
    Completed { response: String },
    /// Every task ran but none of them was the terminal tool.
    Exhausted,
    Failed {
        task_id: Option<u64>,
        reason: String,
    },
    Cancelled,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. } | RunOutcome::Exhausted)
    }

    /// Plain-text rendering for the session host.
    pub fn message(&self) -> String {
        match self {
            RunOutcome::Completed { response } => response.clone(),
            RunOutcome::Exhausted => {
                "All tasks finished without a final response.".to_string()
            }
            RunOutcome::Failed {
                task_id: Some(id),
                reason,
            } => format!("Task {id} failed: {reason}"),
            RunOutcome::Failed {
                task_id: None,
                reason,
            } => format!("Planning failed: {reason}"),
            RunOutcome::Cancelled => "Run cancelled.".to_string(),
        }
    }
}
