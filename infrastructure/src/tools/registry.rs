//! Tool Registry
//!
//! The [`ToolRegistry`] owns the enabled local tools and implements
//! [`ToolExecutorPort`]. It is built once at startup from an explicit
//! registration list of `(name, factory)` pairs; nothing is discovered at
//! runtime.
//!
//! # Usage
//!
//! ```ignore
//! let context = ToolContext::new(Arc::new(MemoryStore::new()));
//! let registry = ToolRegistry::from_enabled(&["calculator", "memory"], &context);
//!
//! let call = ToolCall::new("calculator")
//!     .with_arg("operation", "multiply")
//!     .with_arg("a", 6)
//!     .with_arg("b", 7);
//! let result = registry.execute(&call).await;
//! assert_eq!(result.text(), "Result: 42");
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use hostagent_application::ToolExecutorPort;
use hostagent_domain::{ToolCall, ToolError, ToolResult, ToolSpec, util::preview};
use tracing::{debug, warn};

use super::LocalTool;
use super::calculator::{CALCULATOR, CalculatorTool};
use super::greeting::{GREETING, GreetingTool};
use super::memory::{MEMORY, MemoryStore, MemoryTool};
use super::weather::{WEATHER, WeatherTool};

/// Shared resources handed to tool factories
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub memory: Arc<MemoryStore>,
}

impl ToolContext {
    pub fn new(memory: Arc<MemoryStore>) -> Self {
        Self { memory }
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

type ToolFactory = fn(&ToolContext) -> Box<dyn LocalTool>;

fn calculator_factory(_context: &ToolContext) -> Box<dyn LocalTool> {
    Box::new(CalculatorTool)
}

fn greeting_factory(_context: &ToolContext) -> Box<dyn LocalTool> {
    Box::new(GreetingTool)
}

fn memory_factory(context: &ToolContext) -> Box<dyn LocalTool> {
    Box::new(MemoryTool::new(context.memory.clone()))
}

fn weather_factory(_context: &ToolContext) -> Box<dyn LocalTool> {
    Box::new(WeatherTool)
}

/// Registration list of the built-in tools
const TOOL_FACTORIES: [(&str, ToolFactory); 4] = [
    (CALCULATOR, calculator_factory),
    (GREETING, greeting_factory),
    (WEATHER, weather_factory),
    (MEMORY, memory_factory),
];

/// Names of all built-in tools, in registration order
pub const BUILTIN_TOOL_NAMES: [&str; 4] = [CALCULATOR, GREETING, WEATHER, MEMORY];

/// Local tool backend
pub struct ToolRegistry {
    tools: Vec<Box<dyn LocalTool>>,
    /// Catalogue built from the registered tools' definitions
    tool_spec: ToolSpec,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            tool_spec: ToolSpec::new(),
        }
    }

    /// Register a tool. A tool with the same name replaces the earlier one.
    pub fn register(mut self, tool: Box<dyn LocalTool>) -> Self {
        let definition = tool.definition();
        self.tools.retain(|t| t.definition().name != definition.name);
        debug!(tool = %definition.name, "Registered tool");
        self.tool_spec = self.tool_spec.register(definition);
        self.tools.push(tool);
        self
    }

    /// Build the tools named in `enabled`, in that order.
    ///
    /// Unknown and repeated names are skipped with a warning.
    pub fn from_enabled<S: AsRef<str>>(enabled: &[S], context: &ToolContext) -> Self {
        let mut registry = Self::new();
        for name in enabled.iter().map(AsRef::as_ref) {
            if registry.tool_spec.get(name).is_some() {
                warn!("Tool '{}' is enabled more than once", name);
                continue;
            }
            match TOOL_FACTORIES.iter().find(|(n, _)| *n == name) {
                Some((_, factory)) => registry = registry.register(factory(context)),
                None => warn!("Skipping unknown tool '{}'", name),
            }
        }
        registry
    }

    /// All built-in tools
    pub fn builtin(context: &ToolContext) -> Self {
        Self::from_enabled(&BUILTIN_TOOL_NAMES, context)
    }

    fn tool_for(&self, name: &str) -> Option<&dyn LocalTool> {
        self.tools
            .iter()
            .find(|t| t.definition().name == name)
            .map(|t| t.as_ref())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.tool_for(&call.tool_name) else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::new("NOT_FOUND", format!("Unknown tool: {}", call.tool_name)),
            );
        };

        debug!(tool = %call.tool_name, args = %call.arguments_json(), "Executing tool");
        let result = tool.execute(call);
        debug!(
            tool = %call.tool_name,
            success = result.is_success(),
            output = %preview(&result.text(), 200),
            "Tool finished"
        );
        result
    }
}
