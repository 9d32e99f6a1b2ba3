//! LLM Gateway port
//!
//! Defines the interface for sending a conversation to a chat-completions
//! backend. The infrastructure layer implements it with a failover gateway
//! over several providers; use cases only ever see this trait.

use async_trait::async_trait;
use hostagent_domain::Message;
use thiserror::Error;

/// Last error recorded for one provider during a failed `chat` call
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    pub provider: String,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}{}", hint_suffix(.hint))]
    HttpStatus {
        status: u16,
        body: String,
        hint: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No providers configured")]
    NoProviders,

    #[error("All providers failed: {}", format_failures(.0))]
    AllProvidersFailed(Vec<ProviderFailure>),
}

impl GatewayError {
    /// Whether the error points at credentials rather than the network
    pub fn is_authentication(&self) -> bool {
        match self {
            GatewayError::HttpStatus { status, .. } => *status == 401 || *status == 403,
            other => {
                let text = other.to_string().to_lowercase();
                text.contains("authentication") || text.contains("api key")
            }
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!(" ({})", h))
        .unwrap_or_default()
}

fn format_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.provider, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Gateway for LLM communication
///
/// `extract_assistant_message` interprets a raw response with the rules of
/// the provider that is *currently* selected, so call it right after a
/// successful [`chat`](LlmGateway::chat).
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the full message history and return the raw response body
    async fn chat(&self, messages: &[Message]) -> Result<String, GatewayError>;

    /// Extract the assistant text from a raw response.
    ///
    /// Never fails; an unparsable response yields a fixed fallback string.
    fn extract_assistant_message(&self, raw: &str) -> String;

    /// Name of the currently selected provider
    fn current_provider(&self) -> String;

    /// Names of all providers, in failover order
    fn providers(&self) -> Vec<String> {
        vec![self.current_provider()]
    }

    /// Select a provider by index. Returns `false` when the index is out of range.
    fn switch_to(&self, _index: usize) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregated_error_lists_every_provider() {
        let err = GatewayError::AllProvidersFailed(vec![
            ProviderFailure::new("deepseek", "Request timed out: 60s"),
            ProviderFailure::new("azure", "HTTP 503: busy"),
        ]);
        assert_eq!(
            err.to_string(),
            "All providers failed: deepseek: Request timed out: 60s; azure: HTTP 503: busy"
        );
    }

    #[test]
    fn test_http_status_display_with_hint() {
        let err = GatewayError::HttpStatus {
            status: 401,
            body: "unauthorized".to_string(),
            hint: Some("check the API key".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 401: unauthorized (check the API key)");
        assert!(err.is_authentication());
    }

    #[test]
    fn test_http_status_display_without_hint() {
        let err = GatewayError::HttpStatus {
            status: 500,
            body: "oops".to_string(),
            hint: None,
        };
        assert_eq!(err.to_string(), "HTTP 500: oops");
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_is_authentication_from_message() {
        assert!(GatewayError::Configuration("missing API key".to_string()).is_authentication());
        assert!(!GatewayError::Timeout("60s".to_string()).is_authentication());
    }
}
