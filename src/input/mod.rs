pub mod model;

pub use model::{PlanRequest, ReplanContext};
