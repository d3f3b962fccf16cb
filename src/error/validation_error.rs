/// Structural or semantic problems in a model-produced plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("plan must be a JSON object")]
    NotAnObject,

    #[error("plan is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("plan field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("task at index {0} must be a JSON object")]
    TaskNotAnObject(usize),

    #[error("task at index {index} is missing required field '{field}'")]
    TaskMissingField { index: usize, field: &'static str },

    #[error("task at index {index} uses tool '{tool}' which is not allowed; valid tools are: {}", .allowed.join(", "))]
    ToolNotAllowed {
        index: usize,
        tool: String,
        allowed: Vec<String>,
    },

    #[error("task at index {index} is invalid: {reason}")]
    InvalidTask { index: usize, reason: String },
}
