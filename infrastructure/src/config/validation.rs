//! Configuration issues and secret masking.
//!
//! [`FileConfig::validate`](super::FileConfig::validate) returns a list of
//! [`ConfigIssue`]s. Errors abort startup; warnings are printed and startup
//! continues.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `providers.order` is empty
    NoProviders,
    /// A name in `providers.order` is not a known provider
    UnknownProvider { name: String },
    /// A provider appears more than once in `providers.order`
    DuplicateProvider { name: String },
    /// Neither `api_key` nor the configured env var holds a key
    MissingApiKey { provider: String, env_var: String },
    /// The key still looks like a template value
    PlaceholderApiKey { provider: String },
    /// Azure deployments reject `max_tokens` above this limit
    MaxTokensTooHigh { provider: String, value: u32, limit: u32 },
    /// `agent.max_rounds` is zero
    ZeroMaxRounds,
    /// A name in `tools.enabled` is not a built-in tool
    UnknownTool { name: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Mask a secret for display: first 4 + `****` + last 4 characters.
/// Values of 8 characters or fewer are returned unchanged.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return secret.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}
