use crate::{
    agent::planning::Plan,
    agent::types::TaskStatus,
    tools::{SUBMIT_RESPONSE, ToolDefinition},
    utils::string_util::truncate_chars,
};

const RESULT_PREVIEW_CHARS: usize = 600;

pub fn build_tools_prompt(tools: &[ToolDefinition]) -> String {
    let tools_text = tools
        .iter()
        .map(|tool| {
            format!(
                " - name: {}\n   description: {}\n   params_schema: {}",
                tool.name,
                tool.description,
                tool.params_schema()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Available tools:\n{}\n\nIMPORTANT: These are the ONLY tools available. Do not use or reference any other tools.",
        tools_text
    )
}

pub fn build_system_prompt(tools: &[ToolDefinition]) -> String {
    format!(
        r#"You are a task planning assistant. Break the user's objective into an ordered list of tool invocations.

{tools}

Respond with exactly one JSON object and nothing else: no prose, no notes, no explanations.

Output JSON structure:
{{
  "objective": "string",
  "scratchpad": "string - your reasoning about the plan",
  "tasks": [
    {{
      "id": 1,
      "task_type": "simple_action or agentic_action",
      "action": "tool name from the list above",
      "description": "what this step does, shown to the user",
      "parameters": {{"param": "value"}}
    }}
  ]
}}

Rules:
- Every "action" must be one of the tools listed above.
- Task ids are integers and increase with each task.
- To use the output of an earlier task, write the placeholder {{{{tasks[N].result}}}} where N is that task's id. It is replaced by the raw result text before the tool runs.
- Never write expressions, filters, paths or any other templating to extract data from a result. If you need part of a result, add a task that runs a tool and observe its raw output.
- The last task must be "{terminal}" with the final answer in its "response" parameter."#,
        tools = build_tools_prompt(tools),
        terminal = SUBMIT_RESPONSE,
    )
}

pub fn build_grounding_block(grounding: &str) -> String {
    format!("Current project and environment state:\n{}", grounding.trim())
}

pub fn build_objective_prompt(objective: &str, grounding: Option<&str>) -> String {
    match grounding {
        Some(grounding) if !grounding.trim().is_empty() => format!(
            "{}\n\nPlease generate a task plan.\n\nObjective: {}",
            build_grounding_block(grounding),
            objective
        ),
        _ => format!("Please generate a task plan.\n\nObjective: {}", objective),
    }
}

/// Failure-only context for a corrective plan fragment. Deliberately omits the
/// grounding block and conversation history.
pub fn build_replan_prompt(plan: &Plan, failed_task_id: u64, failure_reason: &str) -> String {
    let progress = plan
        .tasks
        .iter()
        .map(|task| {
            let mut line = format!(
                "- task {} [{}] {}: {}",
                task.id, task.status, task.action, task.description
            );
            if task.status == TaskStatus::Completed
                && let Some(result) = &task.result
            {
                line.push_str(&format!(
                    "\n  result: {}",
                    truncate_chars(result, RESULT_PREVIEW_CHARS)
                ));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    let failed_task = plan
        .task(failed_task_id)
        .and_then(|task| serde_json::to_string(&task.parameters).ok())
        .unwrap_or_else(|| "{}".to_string());

    format!(
        r#"A task in the current plan failed and the remaining work needs a new plan.

Objective: {objective}

Plan progress:
{progress}

Failed task id: {failed_task_id}
Failed task parameters: {failed_task}
Failure reason: {failure_reason}

Return a plan whose tasks replace task {failed_task_id} and every task after it. Completed tasks keep their results and may still be referenced with {{{{tasks[N].result}}}}. Use new task ids starting at {failed_task_id}. Respond with the JSON object only."#,
        objective = plan.objective,
    )
}

pub fn build_corrective_prompt(error: &str) -> String {
    format!(
        "Your previous response could not be used: {}\n\nReturn only the corrected JSON object, with no other text.",
        error
    )
}
