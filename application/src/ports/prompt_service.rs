//! Prompt service port
//!
//! The refinement collaborator: given a prompt name and string arguments it
//! renders a list of messages. The orchestrator feeds the first message to
//! the model as a single user turn.

use std::collections::BTreeMap;

use async_trait::async_trait;
use hostagent_domain::Message;
use thiserror::Error;

/// Errors reported by a prompt service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Invalid prompt arguments: {0}")]
    InvalidArguments(String),

    #[error("Prompt '{0}' rendered no text")]
    EmptyPrompt(String),

    #[error("Prompt backend error: {0}")]
    Backend(String),
}

/// Declared argument of a prompt
#[derive(Debug, Clone, PartialEq)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl PromptArgument {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
        }
    }
}

/// Listing entry for a prompt
#[derive(Debug, Clone, PartialEq)]
pub struct PromptInfo {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

/// Rendered prompt
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPrompt {
    pub description: Option<String>,
    pub messages: Vec<Message>,
}

impl RenderedPrompt {
    /// Text of the first message, if it has any
    pub fn first_text(&self) -> Option<&str> {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Arguments passed to [`PromptServicePort::get_prompt`]
pub type PromptArguments = BTreeMap<String, String>;

#[async_trait]
pub trait PromptServicePort: Send + Sync {
    /// All prompts this service can render
    fn list_prompts(&self) -> Vec<PromptInfo>;

    /// Render a prompt with the given arguments
    async fn get_prompt(
        &self,
        name: &str,
        arguments: &PromptArguments,
    ) -> Result<RenderedPrompt, PromptError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_skips_blank() {
        let prompt = RenderedPrompt {
            description: None,
            messages: vec![Message::user("   ")],
        };
        assert_eq!(prompt.first_text(), None);

        let prompt = RenderedPrompt {
            description: None,
            messages: vec![Message::user("explain"), Message::assistant("ignored")],
        };
        assert_eq!(prompt.first_text(), Some("explain"));
    }
}
