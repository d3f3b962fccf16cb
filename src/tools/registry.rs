use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    error::agent_error::AgentError,
    tools::{SubmitResponseTool, ToolDefinition},
};

/// A capability the executor can dispatch to.
///
/// Handlers receive the parameters exactly as the planner wrote them (after
/// result substitution) and report either a textual result or a failure.
/// Long-running handlers should watch `cancel` and bail out early.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn execute(
        &self,
        parameters: &Map<String, Value>,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError>;
}

struct RegisteredTool {
    definition: ToolDefinition,
    handler: Arc<dyn ToolHandler>,
}

/// Registered tools plus the subset currently enabled for planning.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    order: Vec<String>,
    enabled: HashSet<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in terminal tool already registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(SubmitResponseTool);
        registry
    }

    /// Registers `handler` under its definition's name and enables it.
    /// A handler with the same name is replaced.
    pub fn register<H>(&mut self, handler: H)
    where
        H: ToolHandler + 'static,
    {
        self.register_arc(Arc::new(handler));
    }

    pub fn register_arc(&mut self, handler: Arc<dyn ToolHandler>) {
        let definition = handler.definition();
        let name = definition.name.clone();

        if self.tools.contains_key(&name) {
            warn!("Tool {} re-registered, replacing previous handler", name);
        } else {
            self.order.push(name.clone());
        }

        self.enabled.insert(name.clone());
        self.tools
            .insert(name.clone(), RegisteredTool { definition, handler });
        info!("Tool {} registered", name);
    }

    pub fn enable(&mut self, name: &str) -> bool {
        if self.tools.contains_key(name) {
            self.enabled.insert(name.to_string())
        } else {
            false
        }
    }

    pub fn disable(&mut self, name: &str) -> bool {
        self.enabled.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    pub fn definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name).map(|tool| &tool.definition)
    }

    /// Every registered definition, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition.clone())
            .collect()
    }

    /// Definitions of enabled tools, optionally narrowed to `filter`.
    /// Names in `filter` that are unknown or disabled are ignored.
    pub fn allowed(&self, filter: Option<&[String]>) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter(|name| self.enabled.contains(*name))
            .filter(|name| filter.is_none_or(|only| only.iter().any(|n| n == *name)))
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition.clone())
            .collect()
    }

    /// Runs the named tool.
    ///
    /// An unknown name means validation let something through; the caller
    /// treats [`AgentError::UnknownTool`] as fatal for the task.
    pub async fn dispatch(
        &self,
        name: &str,
        parameters: &Map<String, Value>,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;

        debug!("Dispatching tool {} with parameters {:?}", name, parameters);
        tool.handler.execute(parameters, cancel).await
    }
}
