use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    agent::{
        context::RunContext,
        events::ExecutionEvent,
        execution::resolver::resolve_parameters,
        planning::{Plan, PlanGenerator, PlanOutcome, Task},
        types::{RecoveryStrategy, RunOutcome, TaskStatus},
    },
    completion::CompletionService,
    error::agent_error::AgentError,
    input::PlanRequest,
    shared::AgentConfig,
    tools::{ToolDefinition, ToolRegistry},
};

/// What to do after a task failed.
enum Recovery {
    RetrySameTask,
    Replanned,
    Stop(RunOutcome),
}

/// Drives a plan's tasks in order, recovering from tool failures by retrying
/// or by splicing in a corrective fragment from the planner.
pub struct TaskExecutor<C> {
    registry: Arc<ToolRegistry>,
    generator: Arc<PlanGenerator<C>>,
    config: AgentConfig,
}

impl<C> TaskExecutor<C>
where
    C: CompletionService,
{
    pub fn new(
        registry: Arc<ToolRegistry>,
        generator: Arc<PlanGenerator<C>>,
        config: AgentConfig,
    ) -> Self {
        Self {
            registry,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Runs `plan` to completion, mutating its tasks in place.
    pub async fn execute(&self, plan: &mut Plan, ctx: &RunContext) -> RunOutcome {
        let allowed = self.registry.allowed(ctx.available_tools.as_deref());
        let mut replans_used = 0;
        let mut index = 0;

        info!(
            "Run {} executing plan with {} tasks",
            ctx.run_id,
            plan.tasks.len()
        );

        let outcome = loop {
            let Some(task) = plan.tasks.get(index) else {
                info!("Run {} ran out of tasks", ctx.run_id);
                break RunOutcome::Exhausted;
            };
            if task.status == TaskStatus::Completed {
                index += 1;
                continue;
            }
            if ctx.is_cancelled() {
                break RunOutcome::Cancelled;
            }

            match self.run_task(plan, index, ctx).await {
                Ok(result) => {
                    if plan.tasks[index].action == self.config.terminal_tool {
                        break RunOutcome::Completed { response: result };
                    }
                    index += 1;
                }
                Err(err) if err.is_cancelled() => {
                    info!("Run {} cancelled during task execution", ctx.run_id);
                    break RunOutcome::Cancelled;
                }
                Err(err) => {
                    match self
                        .recover(plan, index, err, &mut replans_used, &allowed, ctx)
                        .await
                    {
                        Recovery::RetrySameTask | Recovery::Replanned => {}
                        Recovery::Stop(outcome) => break outcome,
                    }
                }
            }
        };

        info!("Run {} finished: {}", ctx.run_id, outcome.message());
        ctx.emit(ExecutionEvent::RunFinished {
            outcome: outcome.clone(),
        });
        outcome
    }

    async fn run_task(
        &self,
        plan: &mut Plan,
        index: usize,
        ctx: &RunContext,
    ) -> Result<String, AgentError> {
        let (earlier, rest) = plan.tasks.split_at_mut(index);
        let task = &mut rest[0];

        task.status = TaskStatus::InProgress;
        info!("Executing task {}: {}", task.id, task.description);
        ctx.emit(ExecutionEvent::TaskStarted {
            task_id: task.id,
            description: task.description.clone(),
        });

        let dispatched = match resolve_parameters(&task.parameters, earlier) {
            Ok(parameters) => {
                tokio::select! {
                    biased;
                    _ = ctx.cancel.cancelled() => Err(AgentError::Cancelled),
                    result = self.registry.dispatch(&task.action, &parameters, &ctx.cancel) => result,
                }
            }
            Err(err) => Err(err),
        };

        match dispatched {
            Ok(result) => {
                debug!("Task {} completed", task.id);
                task.status = TaskStatus::Completed;
                task.result = Some(result.clone());
                ctx.emit(ExecutionEvent::TaskCompleted {
                    task_id: task.id,
                    result: result.clone(),
                });
                Ok(result)
            }
            Err(err) => {
                warn!("Task {} failed: {}", task.id, err);
                task.status = TaskStatus::Failed;
                Err(err)
            }
        }
    }

    async fn recover(
        &self,
        plan: &mut Plan,
        index: usize,
        err: AgentError,
        replans_used: &mut u32,
        allowed: &[ToolDefinition],
        ctx: &RunContext,
    ) -> Recovery {
        let reason = err.to_string();
        let task = &mut plan.tasks[index];
        let task_id = task.id;

        if matches!(err, AgentError::UnknownTool(_)) {
            return fail_task(task, reason, false, ctx);
        }

        if task.retries >= self.config.agent_max_retries {
            warn!(
                "Task {} exhausted its retry budget ({})",
                task_id, self.config.agent_max_retries
            );
            return fail_task(task, reason, true, ctx);
        }

        task.retries += 1;
        let attempt = task.retries;

        let replan_allowed = self.config.recovery == RecoveryStrategy::Replan
            && *replans_used < self.config.max_replans_per_run;
        if !replan_allowed {
            info!("Retrying task {} (attempt {})", task_id, attempt);
            ctx.emit(ExecutionEvent::TaskRetrying { task_id, attempt });
            return Recovery::RetrySameTask;
        }

        if ctx.is_cancelled() {
            return Recovery::Stop(RunOutcome::Cancelled);
        }

        *replans_used += 1;
        info!(
            "Replanning from task {} ({}/{}): {}",
            task_id, replans_used, self.config.max_replans_per_run, reason
        );
        let request = PlanRequest::replan(plan.clone(), task_id, reason.clone(), allowed.to_vec())
            .with_model_override(ctx.model_override.clone());

        match self
            .generator
            .generate_and_parse_plan(&request, &ctx.cancel)
            .await
        {
            PlanOutcome::Parsed { plan: fragment, .. } if fragment.tasks.is_empty() => fail_task(
                &mut plan.tasks[index],
                format!(
                    "{}; {}",
                    reason,
                    AgentError::ReplanFailed("the corrective plan has no tasks".to_string())
                ),
                true,
                ctx,
            ),
            PlanOutcome::Parsed { plan: fragment, .. } => {
                let replacement_task_ids = fragment.tasks.iter().map(|task| task.id).collect();
                plan.splice_from(index, fragment);
                ctx.emit(ExecutionEvent::Replanned {
                    failed_task_id: task_id,
                    replacement_task_ids,
                });
                Recovery::Replanned
            }
            PlanOutcome::Cancelled => Recovery::Stop(RunOutcome::Cancelled),
            PlanOutcome::Failed { error, .. } => fail_task(
                &mut plan.tasks[index],
                format!("{}; {}", reason, AgentError::ReplanFailed(error.to_string())),
                true,
                ctx,
            ),
        }
    }
}

/// Marks `task` as terminally failed. `can_retry` tells the host whether a
/// manual retry of the task makes sense; only terminal failures are reported.
fn fail_task(task: &mut Task, reason: String, can_retry: bool, ctx: &RunContext) -> Recovery {
    task.can_retry = Some(can_retry);
    ctx.emit(ExecutionEvent::TaskFailed {
        task_id: task.id,
        reason: reason.clone(),
        can_retry,
    });
    Recovery::Stop(RunOutcome::Failed {
        task_id: Some(task.id),
        reason,
    })
}
