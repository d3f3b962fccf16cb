use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::{
    error::agent_error::AgentError,
    tools::{ToolDefinition, ToolHandler},
};

/// Name of the tool that ends a run successfully.
pub const SUBMIT_RESPONSE: &str = "submit_response";

/// Returns its `response` parameter verbatim as the run's final answer.
#[derive(Debug, Default, Clone)]
pub struct SubmitResponseTool;

#[async_trait]
impl ToolHandler for SubmitResponseTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            SUBMIT_RESPONSE,
            "Deliver the final answer to the user. Must be the last task of every plan.",
        )
        .with_parameter("response", "string", "the final answer text", true)
    }

    async fn execute(
        &self,
        parameters: &Map<String, Value>,
        _cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        match parameters.get("response") {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(AgentError::ExecutionError(
                "submit_response requires a 'response' parameter".to_string(),
            )),
        }
    }
}
