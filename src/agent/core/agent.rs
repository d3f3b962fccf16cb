use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    agent::{
        context::RunContext,
        events::ExecutionEvent,
        execution::TaskExecutor,
        planning::{Plan, PlanGenerator, PlanOutcome},
        types::RunOutcome,
    },
    completion::CompletionService,
    input::PlanRequest,
    message::ChatMessage,
    shared::AgentConfig,
    tools::ToolRegistry,
};

/// Everything a host needs to render the end of a run.
#[derive(Debug)]
pub struct AgentRun {
    pub plan: Option<Plan>,
    pub outcome: RunOutcome,
    pub raw_response: Option<String>,
}

/// Objective in, executed plan out.
pub struct Agent<C> {
    registry: Arc<ToolRegistry>,
    generator: Arc<PlanGenerator<C>>,
    executor: TaskExecutor<C>,
}

impl<C> Agent<C>
where
    C: CompletionService,
{
    pub fn new(client: C, registry: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        let generator = Arc::new(
            PlanGenerator::new(client).with_correction_retries(config.plan_correction_retries),
        );
        let executor = TaskExecutor::new(registry.clone(), generator.clone(), config);
        Self {
            registry,
            generator,
            executor,
        }
    }

    pub fn generator(&self) -> &PlanGenerator<C> {
        &self.generator
    }

    pub fn executor(&self) -> &TaskExecutor<C> {
        &self.executor
    }

    pub async fn run(
        &self,
        objective: &str,
        prior_messages: Vec<ChatMessage>,
        ctx: &RunContext,
    ) -> AgentRun {
        let allowed = self.registry.allowed(ctx.available_tools.as_deref());
        let mut request = PlanRequest::new(objective, allowed)
            .with_prior_messages(prior_messages)
            .with_model_override(ctx.model_override.clone());
        if let Some(grounding) = &ctx.grounding {
            request = request.with_grounding(grounding.clone());
        }

        info!("Run {} planning objective: {}", ctx.run_id, objective);
        let (mut plan, raw_response) =
            match self.generator.generate_and_parse_plan(&request, &ctx.cancel).await {
                PlanOutcome::Parsed { plan, raw_response } => (plan, raw_response),
                PlanOutcome::Cancelled => {
                    return self.finish(ctx, None, RunOutcome::Cancelled, None);
                }
                PlanOutcome::Failed {
                    error,
                    raw_response,
                } => {
                    warn!("Run {} could not produce a plan: {}", ctx.run_id, error);
                    let outcome = RunOutcome::Failed {
                        task_id: None,
                        reason: error.to_string(),
                    };
                    return self.finish(ctx, None, outcome, Some(raw_response));
                }
            };

        ctx.emit(ExecutionEvent::PlanReady { plan: plan.clone() });
        let outcome = self.executor.execute(&mut plan, ctx).await;

        AgentRun {
            plan: Some(plan),
            outcome,
            raw_response: Some(raw_response),
        }
    }

    fn finish(
        &self,
        ctx: &RunContext,
        plan: Option<Plan>,
        outcome: RunOutcome,
        raw_response: Option<String>,
    ) -> AgentRun {
        ctx.emit(ExecutionEvent::RunFinished {
            outcome: outcome.clone(),
        });
        AgentRun {
            plan,
            outcome,
            raw_response,
        }
    }
}
