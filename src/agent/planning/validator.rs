use serde_json::{Value, json};

use crate::{
    agent::planning::{Plan, Task},
    error::validation_error::ValidationError,
    tools::ToolDefinition,
};

/// Checks a raw model-produced plan against the allowed tool set and
/// normalises it in place.
///
/// On success `scratchpad` is a string and every task has its engine-owned
/// fields (`status`, `result`, `retries`, `can_retry`) reset, whatever the
/// model put there.
pub fn validate(raw: &mut Value, allowed_tools: &[ToolDefinition]) -> Result<(), ValidationError> {
    let plan = raw.as_object_mut().ok_or(ValidationError::NotAnObject)?;

    match plan.get("objective") {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("objective")),
        Some(Value::String(_)) => {}
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "objective",
                expected: "a string",
            });
        }
    }

    let scratchpad = match plan.get("scratchpad") {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("scratchpad")),
        Some(Value::String(text)) => text.clone(),
        Some(structured @ (Value::Object(_) | Value::Array(_))) => structured.to_string(),
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "scratchpad",
                expected: "a string or an object",
            });
        }
    };
    plan.insert("scratchpad".to_string(), Value::String(scratchpad));

    let tasks = match plan.get_mut("tasks") {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("tasks")),
        Some(Value::Array(tasks)) => tasks,
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "tasks",
                expected: "an array",
            });
        }
    };

    for (index, task) in tasks.iter_mut().enumerate() {
        let task = task
            .as_object_mut()
            .ok_or(ValidationError::TaskNotAnObject(index))?;

        for field in ["action", "description"] {
            let present = task
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|text| !text.trim().is_empty());
            if !present {
                return Err(ValidationError::TaskMissingField { index, field });
            }
        }

        let action = task.get("action").and_then(Value::as_str).unwrap_or_default();
        if !allowed_tools.iter().any(|tool| tool.name == action) {
            return Err(ValidationError::ToolNotAllowed {
                index,
                tool: action.to_string(),
                allowed: allowed_tools.iter().map(|tool| tool.name.clone()).collect(),
            });
        }

        if task.get("parameters").is_none_or(Value::is_null) {
            task.insert("parameters".to_string(), json!({}));
        }

        task.insert("status".to_string(), json!("pending"));
        task.insert("result".to_string(), Value::Null);
        task.insert("retries".to_string(), json!(0));
        task.remove("can_retry");
    }

    Ok(())
}

/// Validates `raw` and converts it into a typed [`Plan`].
pub fn parse_plan(mut raw: Value, allowed_tools: &[ToolDefinition]) -> Result<Plan, ValidationError> {
    validate(&mut raw, allowed_tools)?;

    // validate() guarantees the shape below.
    let Value::Object(mut fields) = raw else {
        return Err(ValidationError::NotAnObject);
    };
    let objective = match fields.remove("objective") {
        Some(Value::String(objective)) => objective,
        _ => return Err(ValidationError::MissingField("objective")),
    };
    let scratchpad = match fields.remove("scratchpad") {
        Some(Value::String(scratchpad)) => scratchpad,
        _ => return Err(ValidationError::MissingField("scratchpad")),
    };
    let raw_tasks = match fields.remove("tasks") {
        Some(Value::Array(tasks)) => tasks,
        _ => return Err(ValidationError::MissingField("tasks")),
    };

    let tasks = raw_tasks
        .into_iter()
        .enumerate()
        .map(|(index, task)| {
            serde_json::from_value::<Task>(task).map_err(|err| ValidationError::InvalidTask {
                index,
                reason: err.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Plan {
        objective,
        scratchpad,
        tasks,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::agent::types::TaskStatus;

    fn tools(names: &[&str]) -> Vec<ToolDefinition> {
        names
            .iter()
            .map(|name| ToolDefinition::new(*name, "test tool"))
            .collect()
    }

    #[test]
    fn rejects_disallowed_action_and_lists_valid_names() {
        let raw = json!({
            "objective": "o",
            "scratchpad": "s",
            "tasks": [
                {"id": 1, "action": "read_file", "description": "d"},
                {"id": 2, "action": "delete_everything", "description": "d"}
            ]
        });

        let err = parse_plan(raw, &tools(&["read_file", "submit_response"])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("delete_everything"));
        assert!(message.contains("not allowed"));
        assert!(message.contains("read_file, submit_response"));
    }

    #[test]
    fn resets_engine_owned_fields() {
        let raw = json!({
            "objective": "o",
            "scratchpad": "s",
            "tasks": [{
                "id": 7,
                "action": "read_file",
                "description": "d",
                "status": "completed",
                "result": "forged",
                "retries": 9,
                "can_retry": true
            }]
        });

        let plan = parse_plan(raw, &tools(&["read_file"])).unwrap();
        let task = &plan.tasks[0];
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.result, None);
        assert_eq!(task.retries, 0);
        assert_eq!(task.can_retry, None);
    }

    #[test]
    fn stringifies_structured_scratchpad() {
        let raw = json!({
            "objective": "o",
            "scratchpad": {"thoughts": ["a", "b"]},
            "tasks": []
        });

        let plan = parse_plan(raw, &tools(&["read_file"])).unwrap();
        assert_eq!(plan.scratchpad, r#"{"thoughts":["a","b"]}"#);
    }

    #[test]
    fn names_missing_plan_fields() {
        let err = parse_plan(json!({"scratchpad": "s", "tasks": []}), &[]).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("objective"));

        let err = parse_plan(json!({"objective": "o", "tasks": []}), &[]).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("scratchpad"));

        let err = parse_plan(json!({"objective": "o", "scratchpad": "s", "tasks": {}}), &[]).unwrap_err();
        assert!(err.to_string().contains("tasks"));
    }

    #[test]
    fn requires_non_empty_description() {
        let raw = json!({
            "objective": "o",
            "scratchpad": "s",
            "tasks": [{"id": 1, "action": "read_file", "description": "  "}]
        });

        let err = parse_plan(raw, &tools(&["read_file"])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TaskMissingField {
                index: 0,
                field: "description"
            }
        );
    }

    #[test]
    fn reports_task_without_integer_id() {
        let raw = json!({
            "objective": "o",
            "scratchpad": "s",
            "tasks": [{"id": "first", "action": "read_file", "description": "d"}]
        });

        let err = parse_plan(raw, &tools(&["read_file"])).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTask { index: 0, .. }));
    }
}
