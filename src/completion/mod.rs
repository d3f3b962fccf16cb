pub mod gateway;

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub use gateway::GatewayCompletion;

use crate::{error::agent_error::AgentError, message::ChatMessage};

/// Text-in/text-out chat completion.
///
/// Implementations should return [`AgentError::Cancelled`] when they notice
/// `cancel` firing; callers also race the call against the token.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn send_chat(
        &self,
        messages: &[ChatMessage],
        cancel: &CancellationToken,
        model_override: Option<&str>,
    ) -> Result<String, AgentError>;
}

#[async_trait]
impl<T> CompletionService for Arc<T>
where
    T: CompletionService + ?Sized,
{
    async fn send_chat(
        &self,
        messages: &[ChatMessage],
        cancel: &CancellationToken,
        model_override: Option<&str>,
    ) -> Result<String, AgentError> {
        (**self).send_chat(messages, cancel, model_override).await
    }
}
