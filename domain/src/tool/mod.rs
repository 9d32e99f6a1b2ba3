//! Tool domain module
//!
//! Defines how the model reaches tools: a catalogue of [`ToolDefinition`]s
//! rendered into the system prompt, the [`ToolCall`] the model writes as
//! markup inside its reply, and the [`ToolResult`] that is spliced back
//! in place of the call.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ markup::scan │───▶│ ToolResult   │
//! │ (catalogue)  │    │ (ToolCall)   │    │ (splice)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! Execution itself lives behind the application layer's
//! `ToolExecutorPort`; this module does no I/O.

pub mod entities;
pub mod markup;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use value_objects::{ToolError, ToolResult};
