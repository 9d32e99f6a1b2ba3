//! Local tool backend
//!
//! Built-in tools run in-process behind [`ToolRegistry`], which implements
//! the application's `ToolExecutorPort`.

pub mod calculator;
pub mod greeting;
pub mod memory;
pub mod weather;

mod registry;

pub use calculator::CalculatorTool;
pub use greeting::GreetingTool;
pub use memory::{MemoryStore, MemoryTool};
pub use weather::WeatherTool;
pub use registry::{BUILTIN_TOOL_NAMES, ToolContext, ToolRegistry};

use hostagent_domain::{ToolCall, ToolDefinition, ToolResult};

/// A tool executed in-process
pub trait LocalTool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. Failures are reported inside the [`ToolResult`].
    fn execute(&self, call: &ToolCall) -> ToolResult;
}
