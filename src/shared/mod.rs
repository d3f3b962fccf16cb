pub mod config;
pub mod logging;

pub use config::AgentConfig;
pub use logging::{init_tracing, init_tracing_from};
