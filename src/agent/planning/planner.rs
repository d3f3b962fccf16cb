use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    agent::planning::{Plan, parse_plan},
    completion::CompletionService,
    error::agent_error::AgentError,
    input::PlanRequest,
    message::planner::{generate_corrective_messages, generate_planner_messages},
    tools::ToolDefinition,
    utils::string_util::{ExtractJson, StripThinking},
};

/// Result of one generation call. Generation never fails past this boundary.
#[derive(Debug)]
pub enum PlanOutcome {
    Parsed {
        plan: Plan,
        raw_response: String,
    },
    Failed {
        error: AgentError,
        raw_response: String,
    },
    Cancelled,
}

impl PlanOutcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            PlanOutcome::Parsed { plan, .. } => Some(plan),
            _ => None,
        }
    }

    pub fn into_plan(self) -> Option<Plan> {
        match self {
            PlanOutcome::Parsed { plan, .. } => Some(plan),
            _ => None,
        }
    }

    pub fn raw_response(&self) -> Option<&str> {
        match self {
            PlanOutcome::Parsed { raw_response, .. } | PlanOutcome::Failed { raw_response, .. } => {
                Some(raw_response.as_str())
            }
            PlanOutcome::Cancelled => None,
        }
    }

    pub fn error(&self) -> Option<&AgentError> {
        match self {
            PlanOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PlanOutcome::Cancelled)
    }
}

/// Turns objectives and failure reports into validated plans.
pub struct PlanGenerator<C> {
    client: C,
    correction_retries: u32,
}

impl<C> PlanGenerator<C>
where
    C: CompletionService,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            correction_retries: 1,
        }
    }

    pub fn with_correction_retries(mut self, retries: u32) -> Self {
        self.correction_retries = retries;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn generate_and_parse_plan(
        &self,
        request: &PlanRequest,
        cancel: &CancellationToken,
    ) -> PlanOutcome {
        let mut messages = generate_planner_messages(request);
        let mut corrections = 0;

        loop {
            if cancel.is_cancelled() {
                info!("Plan generation cancelled before request");
                return PlanOutcome::Cancelled;
            }

            debug!(
                "Requesting plan (replan: {}, correction {}/{})",
                request.is_replan(),
                corrections,
                self.correction_retries
            );
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(AgentError::Cancelled),
                response = self.client.send_chat(&messages, cancel, request.model_override.as_deref()) => response,
            };

            // A signal that fired while the call was in flight wins over its result.
            if cancel.is_cancelled() {
                info!("Plan generation cancelled during request");
                return PlanOutcome::Cancelled;
            }

            let raw_response = match response {
                Ok(text) => text,
                Err(AgentError::Cancelled) => return PlanOutcome::Cancelled,
                Err(err) => {
                    error!("Completion service failed: {}", err);
                    return PlanOutcome::Failed {
                        error: err,
                        raw_response: String::new(),
                    };
                }
            };

            match parse_response(&raw_response, &request.allowed_tools) {
                Ok(plan) => {
                    info!("Plan parsed with {} tasks", plan.tasks.len());
                    return PlanOutcome::Parsed { plan, raw_response };
                }
                Err(err) if err.is_retriable() && corrections < self.correction_retries => {
                    warn!("Unusable plan response, requesting correction: {}", err);
                    messages =
                        generate_corrective_messages(&messages, &raw_response, &err.to_string());
                    corrections += 1;
                }
                Err(err) => {
                    error!("Plan generation failed: {}", err);
                    return PlanOutcome::Failed {
                        error: err,
                        raw_response,
                    };
                }
            }
        }
    }
}

/// Extracts, parses and validates a plan from a raw model response.
pub fn parse_response(raw: &str, allowed_tools: &[ToolDefinition]) -> Result<Plan, AgentError> {
    let cleaned = raw.strip_thinking();
    let json = cleaned.extract_json().ok_or_else(|| {
        AgentError::MalformedResponse("no JSON object found in the response".to_string())
    })?;
    let value: Value = serde_json::from_str(json)
        .map_err(|err| AgentError::MalformedResponse(format!("invalid JSON: {}", err)))?;
    Ok(parse_plan(value, allowed_tools)?)
}
