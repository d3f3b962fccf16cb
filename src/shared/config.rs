use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    agent::types::RecoveryStrategy,
    error::{Error, Result},
    tools::SUBMIT_RESPONSE,
};

/// Tunables for plan generation and execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Per-task budget of recovery attempts after a tool failure.
    pub agent_max_retries: u32,
    /// Corrective requests allowed per generation when the model's output is unusable.
    pub plan_correction_retries: u32,
    /// Upper bound on replans within one run.
    pub max_replans_per_run: u32,
    pub recovery: RecoveryStrategy,
    pub terminal_tool: String,
    pub max_tokens: u16,
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_max_retries: 2,
            plan_correction_retries: 1,
            max_replans_per_run: 3,
            recovery: RecoveryStrategy::Replan,
            terminal_tool: SUBMIT_RESPONSE.to_string(),
            max_tokens: 4096,
            log_level: "info".to_string(),
        }
    }
}

impl AgentConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AgentConfig::from_json_str(r#"{"agent_max_retries": 5, "recovery": "retry"}"#)
            .unwrap();
        assert_eq!(config.agent_max_retries, 5);
        assert_eq!(config.recovery, RecoveryStrategy::Retry);
        assert_eq!(config.plan_correction_retries, 1);
        assert_eq!(config.terminal_tool, "submit_response");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AgentConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn rejects_mistyped_fields() {
        let err = AgentConfig::from_json_str(r#"{"recovery": "pray"}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
