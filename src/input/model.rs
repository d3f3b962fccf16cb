use crate::{agent::planning::Plan, message::ChatMessage, tools::ToolDefinition};

/// Failure context for a replanning request.
#[derive(Debug, Clone)]
pub struct ReplanContext {
    pub existing_plan: Plan,
    pub failed_task_id: u64,
    pub failure_reason: String,
}

/// Everything the plan generator needs for one call.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Free-text goal, e.g. "add a health-check endpoint".
    pub objective: String,

    /// Snapshot of project/environment state for fresh plans.
    pub grounding: Option<String>,

    /// Earlier conversation turns, oldest first.
    pub prior_messages: Vec<ChatMessage>,

    /// Tools the plan may use. Anything else fails validation.
    pub allowed_tools: Vec<ToolDefinition>,

    pub model_override: Option<String>,

    /// Set when asking for a fragment to replace a failed task.
    pub replan: Option<ReplanContext>,
}

impl PlanRequest {
    pub fn new(objective: impl Into<String>, allowed_tools: Vec<ToolDefinition>) -> Self {
        Self {
            objective: objective.into(),
            grounding: None,
            prior_messages: Vec::new(),
            allowed_tools,
            model_override: None,
            replan: None,
        }
    }

    pub fn replan(
        existing_plan: Plan,
        failed_task_id: u64,
        failure_reason: impl Into<String>,
        allowed_tools: Vec<ToolDefinition>,
    ) -> Self {
        Self {
            objective: existing_plan.objective.clone(),
            grounding: None,
            prior_messages: Vec::new(),
            allowed_tools,
            model_override: None,
            replan: Some(ReplanContext {
                existing_plan,
                failed_task_id,
                failure_reason: failure_reason.into(),
            }),
        }
    }

    pub fn with_grounding(mut self, grounding: impl Into<String>) -> Self {
        self.grounding = Some(grounding.into());
        self
    }

    pub fn with_prior_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.prior_messages = messages;
        self
    }

    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        self.model_override = model;
        self
    }

    pub fn is_replan(&self) -> bool {
        self.replan.is_some()
    }
}
