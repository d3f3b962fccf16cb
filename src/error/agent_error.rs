use crate::error::validation_error::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("plan validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("run cancelled")]
    Cancelled,

    #[error("completion service failed: {0}")]
    Completion(String),

    #[error("{0}")]
    ExecutionError(String),

    #[error("tool '{0}' is not registered")]
    UnknownTool(String),

    #[error("task {referenced} referenced by a placeholder {reason}")]
    UnresolvedReference { referenced: u64, reason: String },

    #[error("unsupported template expression '{0}': only {{{{tasks[N].result}}}} is allowed")]
    UnsupportedTemplate(String),

    #[error("replanning failed: {0}")]
    ReplanFailed(String),

    #[error(transparent)]
    ModelError(#[from] model_gateway_rs::error::Error),
}

impl AgentError {
    /// Whether a corrective request to the model can repair this failure.
    pub fn is_retriable(&self) -> bool {
        matches!(self, AgentError::MalformedResponse(_) | AgentError::Validation(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AgentError::Cancelled)
    }
}
