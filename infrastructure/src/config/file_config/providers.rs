//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

use crate::config::validation::{ConfigIssue, ConfigIssueCode, mask_secret};

/// Azure chat deployments reject larger `max_tokens` values
pub const AZURE_MAX_TOKENS_LIMIT: u32 = 16384;

/// Resolve a key from a direct value or an environment variable.
fn resolve_key(api_key: &Option<String>, api_key_env: &str) -> Option<String> {
    api_key
        .as_ref()
        .filter(|k| !k.trim().is_empty())
        .cloned()
        .or_else(|| {
            std::env::var(api_key_env)
                .ok()
                .filter(|k| !k.trim().is_empty())
        })
}

fn key_issues(provider: &str, key: Option<String>, env_var: &str) -> Vec<ConfigIssue> {
    match key {
        None => vec![ConfigIssue::warning(
            ConfigIssueCode::MissingApiKey {
                provider: provider.to_string(),
                env_var: env_var.to_string(),
            },
            format!(
                "providers.{}: no API key (set {} or providers.{}.api_key)",
                provider, env_var, provider
            ),
        )],
        Some(key) if key.contains("your_") => vec![ConfigIssue::warning(
            ConfigIssueCode::PlaceholderApiKey {
                provider: provider.to_string(),
            },
            format!(
                "providers.{}: API key '{}' looks like a placeholder",
                provider,
                mask_secret(&key)
            ),
        )],
        Some(_) => vec![],
    }
}

/// DeepSeek provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeepSeekConfig {
    /// Full chat-completions URL
    pub url: String,
    /// Environment variable name for the API key (default: "DEEPSEEK_API_KEY").
    pub api_key_env: String,
    /// Direct API key; the env var is preferred.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
    pub frequency_penalty: f64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileDeepSeekConfig {
    fn default() -> Self {
        Self {
            url: "https://api.deepseek.com/v1/chat/completions".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            api_key: None,
            model: "deepseek-chat".to_string(),
            temperature: 0.1,
            max_tokens: 4000,
            top_p: 0.95,
            top_k: 50,
            frequency_penalty: 0.0,
            timeout_secs: 60,
        }
    }
}

impl FileDeepSeekConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        key_issues("deepseek", self.resolve_api_key(), &self.api_key_env)
    }
}

/// Azure OpenAI provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAzureConfig {
    /// Resource endpoint, e.g. `https://<resource>.openai.azure.com`
    pub endpoint: String,
    /// Environment variable name for the API key (default: "AZURE_OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key; the env var is preferred.
    pub api_key: Option<String>,
    pub deployment: String,
    pub api_version: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileAzureConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key_env: "AZURE_OPENAI_API_KEY".to_string(),
            api_key: None,
            deployment: "gpt-4o".to_string(),
            api_version: "2024-02-15-preview".to_string(),
            temperature: 0.01,
            max_tokens: AZURE_MAX_TOKENS_LIMIT,
            top_p: 0.95,
            timeout_secs: 60,
        }
    }
}

impl FileAzureConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(&self.api_key, &self.api_key_env)
    }

    /// Chat-completions URL for the configured deployment
    pub fn chat_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = key_issues("azure", self.resolve_api_key(), &self.api_key_env);
        if self.max_tokens > AZURE_MAX_TOKENS_LIMIT {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MaxTokensTooHigh {
                    provider: "azure".to_string(),
                    value: self.max_tokens,
                    limit: AZURE_MAX_TOKENS_LIMIT,
                },
                format!(
                    "providers.azure.max_tokens = {} exceeds the deployment limit of {}",
                    self.max_tokens, AZURE_MAX_TOKENS_LIMIT
                ),
            ));
        }
        issues
    }
}

/// `[providers]` section
///
/// # Example
///
/// ```toml
/// [providers]
/// order = ["deepseek", "azure"]
///
/// [providers.azure]
/// endpoint = "https://my-resource.openai.azure.com"
/// deployment = "gpt-4o"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Failover order; the first entry starts as the current provider
    pub order: Vec<String>,
    pub deepseek: FileDeepSeekConfig,
    pub azure: FileAzureConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            order: vec!["deepseek".to_string(), "azure".to_string()],
            deepseek: FileDeepSeekConfig::default(),
            azure: FileAzureConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_settings() {
        let config = FileProvidersConfig::default();
        assert_eq!(config.order, vec!["deepseek", "azure"]);
        assert_eq!(config.deepseek.model, "deepseek-chat");
        assert_eq!(config.deepseek.max_tokens, 4000);
        assert_eq!(config.deepseek.top_k, 50);
        assert_eq!(config.azure.temperature, 0.01);
        assert_eq!(config.azure.max_tokens, 16384);
    }

    #[test]
    fn test_azure_chat_url() {
        let config = FileAzureConfig {
            endpoint: "https://res.openai.azure.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.chat_url(),
            "https://res.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn test_direct_key_wins_over_env() {
        let config = FileDeepSeekConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "HOSTAGENT_TEST_UNSET_VARIABLE".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), Some("sk-direct".to_string()));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_missing_and_placeholder_keys_warn() {
        let missing = FileDeepSeekConfig {
            api_key_env: "HOSTAGENT_TEST_UNSET_VARIABLE".to_string(),
            ..Default::default()
        };
        let issues = missing.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0].code, ConfigIssueCode::MissingApiKey { .. }));
        assert!(!issues[0].is_error());

        let placeholder = FileAzureConfig {
            api_key: Some("your_azure_key_here".to_string()),
            ..Default::default()
        };
        let issues = placeholder.validate();
        assert!(matches!(issues[0].code, ConfigIssueCode::PlaceholderApiKey { .. }));
        assert!(!issues[0].message.contains("your_azure_key_here"));
    }

    #[test]
    fn test_azure_max_tokens_limit() {
        let config = FileAzureConfig {
            api_key: Some("real-key-123456".to_string()),
            max_tokens: 64000,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::MaxTokensTooHigh { value: 64000, .. }
        ));
    }
}
