use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::agent::{planning::Plan, types::RunOutcome};

/// Status changes the executor reports to whoever renders the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExecutionEvent {
    PlanReady {
        plan: Plan,
    },
    TaskStarted {
        task_id: u64,
        description: String,
    },
    TaskCompleted {
        task_id: u64,
        result: String,
    },
    TaskFailed {
        task_id: u64,
        reason: String,
        can_retry: bool,
    },
    TaskRetrying {
        task_id: u64,
        attempt: u32,
    },
    Replanned {
        failed_task_id: u64,
        replacement_task_ids: Vec<u64>,
    },
    RunFinished {
        outcome: RunOutcome,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ExecutionEvent,
}

impl Notification {
    pub fn new(run_id: impl Into<String>, event: ExecutionEvent) -> Self {
        Self {
            run_id: run_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// One-way notification surface. Emitting must not block the run.
pub trait EventSink: Send + Sync {
    fn emit(&self, notification: Notification);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _notification: Notification) {}
}

impl EventSink for UnboundedSender<Notification> {
    fn emit(&self, notification: Notification) {
        // A dropped receiver just means nobody is watching.
        let _ = self.send(notification);
    }
}
