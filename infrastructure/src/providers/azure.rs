//! Azure OpenAI chat-completions client

use std::time::Duration;

use async_trait::async_trait;
use hostagent_application::GatewayError;
use hostagent_domain::Message;
use serde_json::{Value, json};

use super::chat_completions::{ApiAuth, ChatCompletionsClient, messages_json};
use super::{ProviderClient, ProviderKind};
use crate::config::FileAzureConfig;

pub struct AzureOpenAiClient {
    settings: FileAzureConfig,
    /// `None` when the endpoint or API key is missing
    transport: Option<ChatCompletionsClient>,
}

impl AzureOpenAiClient {
    pub fn new(settings: &FileAzureConfig) -> Result<Self, GatewayError> {
        let transport = match settings.resolve_api_key() {
            Some(key) if !settings.endpoint.trim().is_empty() => Some(ChatCompletionsClient::new(
                settings.chat_url(),
                ApiAuth::ApiKeyHeader(key),
                Duration::from_secs(settings.timeout_secs),
            )?),
            _ => None,
        };

        Ok(Self {
            settings: settings.clone(),
            transport,
        })
    }

    fn request_body(&self, messages: &[Message]) -> Value {
        json!({
            "messages": messages_json(messages),
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
            "top_p": self.settings.top_p,
        })
    }
}

#[async_trait]
impl ProviderClient for AzureOpenAiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AzureOpenAi
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, GatewayError> {
        let Some(transport) = &self.transport else {
            let missing = if self.settings.endpoint.trim().is_empty() {
                "providers.azure.endpoint".to_string()
            } else {
                format!("{} or providers.azure.api_key", self.settings.api_key_env)
            };
            return Err(GatewayError::Configuration(format!(
                "Azure OpenAI is not configured (set {})",
                missing
            )));
        };
        transport.post(&self.request_body(messages)).await
    }
}
