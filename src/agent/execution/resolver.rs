use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{agent::planning::Task, error::agent_error::AgentError};

static TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("template pattern is valid"));

static RESULT_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*tasks\[(\d+)\]\.result\s*$").expect("result reference pattern is valid")
});

/// Substitutes `{{tasks[N].result}}` placeholders in every string inside
/// `parameters` with the result of task `N`.
///
/// `earlier` holds the tasks positioned before the one being dispatched; when
/// ids repeat, the nearest one wins. Substitution is purely textual and any
/// other `{{...}}` expression is rejected.
pub fn resolve_parameters(
    parameters: &Map<String, Value>,
    earlier: &[Task],
) -> Result<Map<String, Value>, AgentError> {
    parameters
        .iter()
        .map(|(key, value)| Ok::<_, AgentError>((key.clone(), resolve_value(value, earlier)?)))
        .collect()
}

fn resolve_value(value: &Value, earlier: &[Task]) -> Result<Value, AgentError> {
    match value {
        Value::String(text) => resolve_text(text, earlier).map(Value::String),
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_value(item, earlier))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(fields) => resolve_parameters(fields, earlier).map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn resolve_text(text: &str, earlier: &[Task]) -> Result<String, AgentError> {
    let mut resolved = String::with_capacity(text.len());
    let mut last = 0;

    for captures in TEMPLATE.captures_iter(text) {
        let (Some(whole), Some(expression)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let id = RESULT_REFERENCE
            .captures(expression.as_str())
            .and_then(|reference| reference.get(1))
            .and_then(|id| id.as_str().parse::<u64>().ok())
            .ok_or_else(|| AgentError::UnsupportedTemplate(whole.as_str().to_string()))?;

        resolved.push_str(&text[last..whole.start()]);
        resolved.push_str(lookup_result(id, earlier)?);
        last = whole.end();
    }

    resolved.push_str(&text[last..]);
    Ok(resolved)
}

fn lookup_result(id: u64, earlier: &[Task]) -> Result<&str, AgentError> {
    let task = earlier
        .iter()
        .rev()
        .find(|task| task.id == id)
        .ok_or_else(|| AgentError::UnresolvedReference {
            referenced: id,
            reason: "does not exist before this task".to_string(),
        })?;

    match (&task.result, task.is_completed()) {
        (Some(result), true) => Ok(result.as_str()),
        _ => Err(AgentError::UnresolvedReference {
            referenced: id,
            reason: format!("has not completed (status: {})", task.status),
        }),
    }
}
