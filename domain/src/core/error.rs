//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed tool call: {0}")]
    MalformedToolCall(String),

    #[error("Failed to parse tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool arguments must be a JSON object, got {0}")]
    ArgumentsNotObject(String),
}

impl DomainError {
    /// Check if this error comes from the JSON argument payload
    /// rather than from the surrounding markup.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidArguments(_) | DomainError::ArgumentsNotObject(_)
        )
    }
}
