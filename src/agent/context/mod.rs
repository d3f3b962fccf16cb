use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::agent::events::{EventSink, ExecutionEvent, NoopSink, Notification};

/// Per-run state owned by the caller and threaded through generation and
/// execution.
///
/// # Fields
/// - `run_id`: identifier stamped on every notification.
/// - `session_id`: optional host session the run belongs to.
/// - `cancel`: the run's single cancellation signal.
/// - `grounding`: project/environment snapshot included in fresh plans.
/// - `available_tools`: optional narrowing of the registry's enabled tools.
/// - `model_override`: model name forwarded to the completion service.
/// - `events`: where status changes are reported.
/// - `metadata`: free-form data for hosts and tools.
#[derive(Clone)]
pub struct RunContext {
    pub run_id: String,
    pub session_id: Option<String>,
    pub cancel: CancellationToken,
    pub grounding: Option<String>,
    pub available_tools: Option<Vec<String>>,
    pub model_override: Option<String>,
    pub events: Arc<dyn EventSink>,
    pub metadata: HashMap<String, Value>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().simple().to_string(),
            session_id: None,
            cancel: CancellationToken::new(),
            grounding: None,
            available_tools: None,
            model_override: None,
            events: Arc::new(NoopSink),
            metadata: HashMap::new(),
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_grounding(mut self, grounding: impl Into<String>) -> Self {
        self.grounding = Some(grounding.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.available_tools = Some(tools);
        self
    }

    pub fn with_model_override(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn emit(&self, event: ExecutionEvent) {
        self.events.emit(Notification::new(self.run_id.clone(), event));
    }
}
