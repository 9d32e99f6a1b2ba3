//! Tool Executor port
//!
//! The tool backend receives a tool name and an argument map and returns
//! content or an error. How tools are registered or reached is up to the
//! adapter.

use async_trait::async_trait;
use hostagent_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// This port defines how the application layer executes tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the catalogue of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Execute a tool call. Failures are reported inside the [`ToolResult`].
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
