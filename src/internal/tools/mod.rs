pub mod definitions;
pub mod dispatcher;

// Re-export main types
pub use definitions::{tool_definitions, GET_CATEGORY, GET_INTERFACE, GET_PROJECT_CATEGORIES};
pub use dispatcher::{Connector, ToolDispatcher};
