pub mod executor;
pub mod resolver;

pub use executor::TaskExecutor;
pub use resolver::resolve_parameters;
