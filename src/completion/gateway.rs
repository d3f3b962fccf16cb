use std::collections::HashMap;

use async_trait::async_trait;
use model_gateway_rs::{
    clients::llm::LlmClient,
    model::llm::{LlmInput, LlmOutput},
    sdk::ModelSDK,
    traits::ModelClient,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    completion::CompletionService, error::agent_error::AgentError, message::ChatMessage,
    message::llm::to_gateway_messages, shared::AgentConfig,
};

/// [`CompletionService`] backed by model-gateway clients.
///
/// Model overrides are looked up by name among the registered alternates; an
/// unknown override falls back to the default client.
pub struct GatewayCompletion<T>
where
    T: ModelSDK<Input = LlmInput, Output = LlmOutput> + Sync + Send,
{
    default: LlmClient<T>,
    alternates: HashMap<String, LlmClient<T>>,
    max_tokens: Option<u16>,
}

impl<T> GatewayCompletion<T>
where
    T: ModelSDK<Input = LlmInput, Output = LlmOutput> + Sync + Send,
{
    pub fn new(sdk: T) -> Self {
        Self::from_config(sdk, &AgentConfig::default())
    }

    pub fn from_config(sdk: T, config: &AgentConfig) -> Self {
        Self {
            default: LlmClient::new(sdk),
            alternates: HashMap::new(),
            max_tokens: Some(config.max_tokens),
        }
    }

    pub fn with_alternate(mut self, model: impl Into<String>, sdk: T) -> Self {
        self.alternates.insert(model.into(), LlmClient::new(sdk));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u16>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn client_for(&self, model_override: Option<&str>) -> &LlmClient<T> {
        match model_override {
            Some(model) => self.alternates.get(model).unwrap_or_else(|| {
                warn!("No client registered for model {}, using default", model);
                &self.default
            }),
            None => &self.default,
        }
    }
}

#[async_trait]
impl<T> CompletionService for GatewayCompletion<T>
where
    T: ModelSDK<Input = LlmInput, Output = LlmOutput> + Sync + Send,
{
    async fn send_chat(
        &self,
        messages: &[ChatMessage],
        cancel: &CancellationToken,
        model_override: Option<&str>,
    ) -> Result<String, AgentError> {
        let input = llm_input(messages, self.max_tokens);
        let client = self.client_for(model_override);
        debug!("Sending {} messages to completion service", messages.len());

        tokio::select! {
            _ = cancel.cancelled() => Err(AgentError::Cancelled),
            output = client.infer(input) => {
                let output: LlmOutput = output?;
                Ok(output.get_content().to_string())
            }
        }
    }
}

fn llm_input(messages: &[ChatMessage], max_tokens: Option<u16>) -> LlmInput {
    LlmInput {
        messages: to_gateway_messages(messages),
        max_tokens: max_tokens.map(Into::into),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_carries_messages_and_token_limit() {
        let config = AgentConfig::from_json_str(r#"{"max_tokens": 512}"#).unwrap();
        let messages = [ChatMessage::system("rules"), ChatMessage::user("objective")];

        let input = llm_input(&messages, Some(config.max_tokens));
        assert_eq!(input.messages.len(), 2);
        assert_eq!(input.max_tokens, Some(512u16.into()));

        assert!(llm_input(&messages, None).max_tokens.is_none());
    }
}
