pub mod instantiate;
pub mod model;
pub mod registry;

pub use instantiate::{SUBMIT_RESPONSE, SubmitResponseTool};
pub use model::{ToolDefinition, ToolParameter};
pub use registry::{ToolHandler, ToolRegistry};
