use serde::{Deserialize, Serialize};

/// Schema of a single tool parameter as shown to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.parameters.push(ToolParameter {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required,
        });
        self
    }

    /// Compact JSON-ish schema line used in prompts, e.g.
    /// `{"path": "string (required) - file to read"}`.
    pub fn params_schema(&self) -> String {
        let fields = self
            .parameters
            .iter()
            .map(|param| {
                let required = if param.required { " (required)" } else { "" };
                format!(
                    "\"{}\": \"{}{} - {}\"",
                    param.name, param.param_type, required, param.description
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", fields)
    }
}
