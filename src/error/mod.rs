pub mod agent_error;
pub mod validation_error;

use std::{io, path::PathBuf};

use thiserror::Error as ThisError;

/// Errors raised while loading [`AgentConfig`](crate::shared::AgentConfig).
/// Generation and execution report through [`agent_error::AgentError`] instead.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("cannot read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
