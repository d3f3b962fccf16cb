//! Plan generation, validation and execution engine for a language-model
//! driven coding agent.
//!
//! A [`PlanGenerator`](agent::PlanGenerator) asks a
//! [`CompletionService`](completion::CompletionService) for a JSON plan and
//! validates it against the tools the run may use; a
//! [`TaskExecutor`](agent::TaskExecutor) runs the plan's tasks through a
//! [`ToolRegistry`](tools::ToolRegistry) and replans when a task fails.

pub mod agent;
pub mod completion;
pub mod error;
pub mod input;
pub mod message;
pub mod prompt;
pub mod shared;
pub mod tools;
pub mod utils;
