//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section has `#[serde(default)]`, so any subset of keys is valid.

mod agent;
mod logging;
mod providers;
mod repl;
mod tools;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use providers::{
    AZURE_MAX_TOKENS_LIMIT, FileAzureConfig, FileDeepSeekConfig, FileProvidersConfig,
};
pub use repl::FileReplConfig;
pub use tools::FileToolsConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::validation::{ConfigIssue, ConfigIssueCode, mask_secret};
use crate::providers::ProviderKind;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completions backends and their failover order
    pub providers: FileProvidersConfig,
    /// Turn loop settings
    pub agent: FileAgentConfig,
    /// Built-in tool selection
    pub tools: FileToolsConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Only providers listed in `providers.order` have their credentials
    /// checked.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Provider order
        if self.providers.order.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoProviders,
                "providers.order is empty; at least one provider is required",
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.providers.order {
            let Some(kind) = ProviderKind::parse(name) else {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider { name: name.clone() },
                    format!(
                        "providers.order: unknown provider '{}' (expected one of: {})",
                        name,
                        ProviderKind::ALL
                            .iter()
                            .map(|k| k.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                ));
                continue;
            };

            if !seen.insert(kind) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateProvider { name: name.clone() },
                    format!("providers.order: '{}' is listed more than once", name),
                ));
                continue;
            }

            // 2. Credentials and limits of each ordered provider
            match kind {
                ProviderKind::DeepSeek => issues.extend(self.providers.deepseek.validate()),
                ProviderKind::AzureOpenAi => issues.extend(self.providers.azure.validate()),
            }
        }

        // 3. Agent loop
        issues.extend(self.agent.validate());

        // 4. Tools
        issues.extend(self.tools.validate());

        issues
    }

    /// Human-readable summary with secrets masked (for `--show-config`)
    pub fn summary(&self) -> Vec<String> {
        let key_display = |key: Option<String>, env: &str| match key {
            Some(k) => mask_secret(&k),
            None => format!("<unset: {}>", env),
        };

        let mut lines = vec![format!("providers.order = {:?}", self.providers.order)];
        let ds = &self.providers.deepseek;
        lines.push(format!(
            "providers.deepseek: url={} model={} api_key={} temperature={} max_tokens={} timeout={}s",
            ds.url,
            ds.model,
            key_display(ds.resolve_api_key(), &ds.api_key_env),
            ds.temperature,
            ds.max_tokens,
            ds.timeout_secs
        ));
        let az = &self.providers.azure;
        lines.push(format!(
            "providers.azure: endpoint={} deployment={} api_version={} api_key={} temperature={} max_tokens={} timeout={}s",
            if az.endpoint.is_empty() { "<unset>" } else { &az.endpoint },
            az.deployment,
            az.api_version,
            key_display(az.resolve_api_key(), &az.api_key_env),
            az.temperature,
            az.max_tokens,
            az.timeout_secs
        ));
        lines.push(format!(
            "agent: max_rounds={} refine={} refinement_prompt={} calculation_hint={}",
            self.agent.max_rounds,
            self.agent.refine,
            self.agent.refinement_prompt,
            self.agent.calculation_hint
        ));
        lines.push(format!("tools.enabled = {:?}", self.tools.enabled));
        lines.push(format!(
            "repl: show_progress={} save_history={}",
            self.repl.show_progress, self.repl.save_history
        ));
        lines.push(format!(
            "logging.conversation_log = {}",
            self.logging.conversation_log.as_deref().unwrap_or("<disabled>")
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::Severity;

    fn with_keys(mut config: FileConfig) -> FileConfig {
        config.providers.deepseek.api_key = Some("sk-deepseek-test-key".to_string());
        config.providers.azure.api_key = Some("azure-test-key-1234".to_string());
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers]
order = ["azure", "deepseek"]

[providers.deepseek]
model = "deepseek-reasoner"
timeout_secs = 30

[providers.azure]
endpoint = "https://res.openai.azure.com"
deployment = "gpt-4o-mini"

[agent]
max_rounds = 5
refine = false

[tools]
enabled = ["calculator"]

[repl]
show_progress = false

[logging]
conversation_log = "/tmp/conv.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.order, vec!["azure", "deepseek"]);
        assert_eq!(config.providers.deepseek.model, "deepseek-reasoner");
        assert_eq!(config.providers.deepseek.timeout_secs, 30);
        assert_eq!(config.providers.deepseek.top_k, 50);
        assert_eq!(config.providers.azure.deployment, "gpt-4o-mini");
        assert_eq!(config.agent.max_rounds, 5);
        assert!(!config.agent.refine);
        assert!(config.agent.calculation_hint);
        assert_eq!(config.tools.enabled, vec!["calculator"]);
        assert!(!config.repl.show_progress);
        assert!(config.repl.save_history);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("/tmp/conv.jsonl")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[agent]\nmax_rounds = 3\n").unwrap();
        assert_eq!(config.agent.max_rounds, 3);
        assert_eq!(config.providers, FileProvidersConfig::default());
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = with_keys(FileConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_provider_order() {
        let mut config = with_keys(FileConfig::default());
        config.providers.order = vec![
            "deepseek".to_string(),
            "openai".to_string(),
            "deepseek".to_string(),
        ];

        let issues = config.validate();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::UnknownProvider {
                name: "openai".to_string()
            }
        );
        assert_eq!(issues[1].severity, Severity::Warning);
        assert!(matches!(
            issues[1].code,
            ConfigIssueCode::DuplicateProvider { .. }
        ));
    }

    #[test]
    fn test_validate_empty_order() {
        let mut config = with_keys(FileConfig::default());
        config.providers.order.clear();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::NoProviders && i.is_error()));
    }

    #[test]
    fn test_unordered_provider_credentials_not_checked() {
        let mut config = FileConfig::default();
        config.providers.order = vec!["deepseek".to_string()];
        config.providers.deepseek.api_key = Some("sk-deepseek-test-key".to_string());
        config.providers.azure.api_key = None;
        config.providers.azure.api_key_env = "HOSTAGENT_TEST_UNSET_VARIABLE".to_string();

        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_summary_masks_keys() {
        let config = with_keys(FileConfig::default());
        let summary = config.summary().join("\n");
        assert!(summary.contains("sk-d****-key"));
        assert!(!summary.contains("sk-deepseek-test-key"));
        assert!(summary.contains("<disabled>"));
    }
}
