use model_gateway_rs::model::llm::ChatMessage as GatewayMessage;

use crate::message::{ChatMessage, Role};

impl From<&ChatMessage> for GatewayMessage {
    fn from(message: &ChatMessage) -> Self {
        match message.role {
            Role::System => GatewayMessage::system(message.content.as_str()),
            Role::User => GatewayMessage::user(message.content.as_str()),
            Role::Assistant => GatewayMessage::assistant(message.content.as_str()),
        }
    }
}

pub fn to_gateway_messages(messages: &[ChatMessage]) -> Vec<GatewayMessage> {
    messages.iter().map(GatewayMessage::from).collect()
}
