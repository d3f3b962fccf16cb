pub mod context;
pub mod core;
pub mod events;
pub mod execution;
pub mod planning;
pub mod types;

pub use context::RunContext;
pub use self::core::{Agent, AgentRun};
pub use events::{EventSink, ExecutionEvent, NoopSink, Notification};
pub use execution::TaskExecutor;
pub use planning::{Plan, PlanGenerator, PlanOutcome, Task};
pub use types::{RecoveryStrategy, RunOutcome, TaskStatus, TaskType};
