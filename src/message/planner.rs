use crate::{
    input::PlanRequest,
    message::ChatMessage,
    prompt::builder::{
        build_corrective_prompt, build_objective_prompt, build_replan_prompt, build_system_prompt,
    },
};

/// Composes the initial message list for a generation request.
///
/// Fresh requests carry prior turns, the grounding block and the objective.
/// Replanning requests carry only the failure context.
pub fn generate_planner_messages(request: &PlanRequest) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(build_system_prompt(&request.allowed_tools))];

    match &request.replan {
        Some(replan) => {
            messages.push(ChatMessage::user(build_replan_prompt(
                &replan.existing_plan,
                replan.failed_task_id,
                &replan.failure_reason,
            )));
        }
        None => {
            messages.extend(request.prior_messages.iter().cloned());
            messages.push(ChatMessage::user(build_objective_prompt(
                &request.objective,
                request.grounding.as_deref(),
            )));
        }
    }

    messages
}

/// Appends the rejected response and the error that made it unusable.
pub fn generate_corrective_messages(
    previous: &[ChatMessage],
    rejected_response: &str,
    error: &str,
) -> Vec<ChatMessage> {
    let mut messages = previous.to_vec();
    messages.push(ChatMessage::assistant(rejected_response));
    messages.push(ChatMessage::user(build_corrective_prompt(error)));
    messages
}
