use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::agent::types::{TaskStatus, TaskType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,

    #[serde(default)]
    pub task_type: TaskType,

    pub action: String,

    pub description: String,

    #[serde(default)]
    pub parameters: Map<String, Value>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub result: Option<String>,

    #[serde(default)]
    pub retries: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_retry: Option<bool>,
}

impl Task {
    pub fn new(id: u64, action: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            task_type: TaskType::default(),
            action: action.into(),
            description: description.into(),
            parameters: Map::new(),
            status: TaskStatus::Pending,
            result: None,
            retries: 0,
            can_retry: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
