use tracing_subscriber::{EnvFilter, fmt};

use crate::shared::AgentConfig;

/// Installs a fmt subscriber. `RUST_LOG` takes precedence over `default_level`.
/// Calling it again after a subscriber is set is a no-op.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

/// [`init_tracing`] with the configured `log_level` as the default filter.
pub fn init_tracing_from(config: &AgentConfig) {
    init_tracing(&config.log_level);
}
