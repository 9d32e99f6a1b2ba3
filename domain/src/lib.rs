//! Domain layer for hostagent
//!
//! This crate contains the core entities and value objects of a
//! tool-calling conversation. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Conversation history**: the ordered `{role, content}` transcript
//!   sent to the model on every call
//! - **Tool markup**: the delimited blocks the model writes to request a
//!   tool, and the result/error markers spliced back in their place
//! - **Prompt templates**: the system prompt built from the tool catalogue
//!   and the fixed prompts used while driving a turn

pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use core::error::DomainError;
pub use prompt::{PromptLanguage, PromptTemplate, ResultType, TIMEOUT_RESULT, UNPARSABLE_RESPONSE};
pub use session::{
    entities::{Message, Role},
    history::ConversationHistory,
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    markup::Segment,
    value_objects::{ToolError, ToolResult},
};
