pub mod planner;
mod task;
pub mod validator;

pub use planner::{PlanGenerator, PlanOutcome};
use serde::{Deserialize, Serialize};
pub use task::Task;
pub use validator::{parse_plan, validate};

/// Ordered task list produced for one objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub objective: String,

    #[serde(default)]
    pub scratchpad: String,

    pub tasks: Vec<Task>,
}

impl Plan {
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replaces the task at `index` and everything after it with `fragment`.
    /// The objective is left untouched.
    pub fn splice_from(&mut self, index: usize, fragment: Plan) {
        self.tasks.truncate(index);
        self.tasks.extend(fragment.tasks);
        if !fragment.scratchpad.is_empty() {
            self.scratchpad = fragment.scratchpad;
        }
    }
}
