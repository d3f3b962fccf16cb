#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusplan::{
    agent::{Plan, Task},
    completion::CompletionService,
    error::agent_error::AgentError,
    message::{ChatMessage, Role},
    tools::{ToolDefinition, ToolHandler, ToolRegistry},
};
use serde_json::{Map, Value, json};
use tokio_util::sync::CancellationToken;

/// Replays canned responses and records every request it receives.
#[derive(Default)]
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<String, AgentError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    cancel_on_call: Option<CancellationToken>,
}

impl ScriptedCompletion {
    pub fn new<I, S>(responses: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            ..Default::default()
        })
    }

    pub fn failing(error: AgentError) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([Err(error)])),
            ..Default::default()
        })
    }

    /// Fires `token` while the call is in flight, then answers with `response`.
    pub fn cancelling(token: CancellationToken, response: &str) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([Ok(response.to_string())])),
            calls: Mutex::new(Vec::new()),
            cancel_on_call: Some(token),
        })
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn send_chat(
        &self,
        messages: &[ChatMessage],
        _cancel: &CancellationToken,
        _model_override: Option<&str>,
    ) -> Result<String, AgentError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if let Some(token) = &self.cancel_on_call {
            token.cancel();
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Completion("script exhausted".to_string())))
    }
}

/// Never answers; only cancellation ends the call.
pub struct HangingCompletion;

#[async_trait]
impl CompletionService for HangingCompletion {
    async fn send_chat(
        &self,
        _messages: &[ChatMessage],
        _cancel: &CancellationToken,
        _model_override: Option<&str>,
    ) -> Result<String, AgentError> {
        std::future::pending::<()>().await;
        Ok(String::new())
    }
}

/// Tool whose results are scripted; records the parameters of every call.
pub struct ScriptedTool {
    name: &'static str,
    results: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<Map<String, Value>>>,
    cancel_on_call: Option<CancellationToken>,
}

impl ScriptedTool {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            cancel_on_call: None,
        }
    }

    pub fn ok(self, result: &str) -> Self {
        self.results.lock().unwrap().push_back(Ok(result.to_string()));
        self
    }

    pub fn err(self, reason: &str) -> Self {
        self.results.lock().unwrap().push_back(Err(reason.to_string()));
        self
    }

    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_call = Some(token);
        self
    }

    pub fn calls(&self) -> Vec<Map<String, Value>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolHandler for ScriptedTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name, format!("scripted {}", self.name))
    }

    async fn execute(
        &self,
        parameters: &Map<String, Value>,
        _cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        self.calls.lock().unwrap().push(parameters.clone());
        if let Some(token) = &self.cancel_on_call {
            token.cancel();
        }
        match self.results.lock().unwrap().pop_front() {
            Some(Ok(result)) => Ok(result),
            Some(Err(reason)) => Err(AgentError::ExecutionError(reason)),
            None => Ok("ok".to_string()),
        }
    }
}

pub fn registry_with(tools: Vec<Arc<ScriptedTool>>) -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::with_builtins();
    for tool in tools {
        registry.register_arc(tool);
    }
    Arc::new(registry)
}

pub fn definitions(names: &[&str]) -> Vec<ToolDefinition> {
    names
        .iter()
        .map(|name| ToolDefinition::new(*name, "test tool"))
        .collect()
}

pub fn plan_json(tasks: Value) -> String {
    json!({"objective": "o", "scratchpad": "s", "tasks": tasks}).to_string()
}

pub fn plan(tasks: Vec<Task>) -> Plan {
    Plan {
        objective: "o".to_string(),
        scratchpad: String::new(),
        tasks,
    }
}

pub fn user_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|message| message.role == Role::User)
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn all_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
