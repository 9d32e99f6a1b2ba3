//! Chat-completions provider clients
//!
//! The set of providers is closed: each [`ProviderKind`] has one client type
//! and one factory in [`build_providers`]'s registration list. Which of them
//! are used, and in what failover order, comes from `[providers] order`.

pub mod azure;
pub mod chat_completions;
pub mod deepseek;
pub mod failover;

pub use azure::AzureOpenAiClient;
pub use chat_completions::{ApiAuth, ChatCompletionsClient, extract_content};
pub use deepseek::DeepSeekClient;
pub use failover::FailoverGateway;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use hostagent_application::GatewayError;
use hostagent_domain::Message;
use tracing::{debug, warn};

use crate::config::FileProvidersConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    DeepSeek,
    AzureOpenAi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::DeepSeek, ProviderKind::AzureOpenAi];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Some(ProviderKind::DeepSeek),
            "azure" | "azure-openai" | "azure_openai" => Some(ProviderKind::AzureOpenAi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::AzureOpenAi => "azure",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One chat-completions backend
#[async_trait]
pub trait ProviderClient: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Send the history and return the raw response body
    async fn chat(&self, messages: &[Message]) -> Result<String, GatewayError>;

    /// Assistant text of a raw response, or the fixed fallback text
    fn extract_assistant_message(&self, raw: &str) -> String {
        extract_content(raw)
    }
}

type ProviderFactory = fn(&FileProvidersConfig) -> Result<Arc<dyn ProviderClient>, GatewayError>;

fn deepseek_factory(config: &FileProvidersConfig) -> Result<Arc<dyn ProviderClient>, GatewayError> {
    Ok(Arc::new(DeepSeekClient::new(&config.deepseek)?))
}

fn azure_factory(config: &FileProvidersConfig) -> Result<Arc<dyn ProviderClient>, GatewayError> {
    Ok(Arc::new(AzureOpenAiClient::new(&config.azure)?))
}

/// Registration list: one factory per provider kind
const PROVIDER_FACTORIES: [(ProviderKind, ProviderFactory); 2] = [
    (ProviderKind::DeepSeek, deepseek_factory),
    (ProviderKind::AzureOpenAi, azure_factory),
];

/// Build the clients named in `order`, in that order.
///
/// Unknown and repeated names are skipped with a warning; configuration
/// validation reports them before this runs.
pub fn build_providers(
    config: &FileProvidersConfig,
) -> Result<Vec<Arc<dyn ProviderClient>>, GatewayError> {
    let mut seen = HashSet::new();
    let mut providers = Vec::new();

    for name in &config.order {
        let Some(kind) = ProviderKind::parse(name) else {
            warn!("Skipping unknown provider '{}'", name);
            continue;
        };
        if !seen.insert(kind) {
            warn!("Skipping duplicate provider '{}'", name);
            continue;
        }
        let Some((_, factory)) = PROVIDER_FACTORIES.iter().find(|(k, _)| *k == kind) else {
            continue;
        };
        providers.push(factory(config)?);
        debug!("Registered provider {}", kind);
    }

    if providers.is_empty() {
        return Err(GatewayError::NoProviders);
    }
    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(ProviderKind::parse("deepseek"), Some(ProviderKind::DeepSeek));
        assert_eq!(ProviderKind::parse(" Azure "), Some(ProviderKind::AzureOpenAi));
        assert_eq!(ProviderKind::parse("azure-openai"), Some(ProviderKind::AzureOpenAi));
        assert_eq!(ProviderKind::parse("openai"), None);
    }

    #[test]
    fn test_build_providers_follows_order() {
        let config = FileProvidersConfig {
            order: vec![
                "azure".to_string(),
                "bogus".to_string(),
                "deepseek".to_string(),
                "azure".to_string(),
            ],
            ..Default::default()
        };

        let providers = build_providers(&config).unwrap();
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();

        assert_eq!(names, vec!["azure", "deepseek"]);
    }

    #[test]
    fn test_build_providers_empty_order() {
        let config = FileProvidersConfig {
            order: vec![],
            ..Default::default()
        };
        assert!(matches!(
            build_providers(&config),
            Err(GatewayError::NoProviders)
        ));
    }
}
