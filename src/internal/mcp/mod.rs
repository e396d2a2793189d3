pub mod processor;
pub mod protocol;
pub mod registry;

// Re-export main types
pub use processor::McpProcessor;
pub use registry::{RegisteredTool, ToolExecutor, ToolRegistry};
