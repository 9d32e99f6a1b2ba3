//! DeepSeek chat-completions client

use std::time::Duration;

use async_trait::async_trait;
use hostagent_application::GatewayError;
use hostagent_domain::Message;
use serde_json::{Value, json};

use super::chat_completions::{ApiAuth, ChatCompletionsClient, messages_json};
use super::{ProviderClient, ProviderKind};
use crate::config::FileDeepSeekConfig;

pub struct DeepSeekClient {
    settings: FileDeepSeekConfig,
    /// `None` when no API key is configured
    transport: Option<ChatCompletionsClient>,
}

impl DeepSeekClient {
    pub fn new(settings: &FileDeepSeekConfig) -> Result<Self, GatewayError> {
        let transport = settings
            .resolve_api_key()
            .map(|key| {
                ChatCompletionsClient::new(
                    settings.url.clone(),
                    ApiAuth::Bearer(key),
                    Duration::from_secs(settings.timeout_secs),
                )
            })
            .transpose()?;

        Ok(Self {
            settings: settings.clone(),
            transport,
        })
    }

    fn request_body(&self, messages: &[Message]) -> Value {
        json!({
            "model": self.settings.model,
            "messages": messages_json(messages),
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
            "top_p": self.settings.top_p,
            "top_k": self.settings.top_k,
            "frequency_penalty": self.settings.frequency_penalty,
        })
    }
}

#[async_trait]
impl ProviderClient for DeepSeekClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepSeek
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, GatewayError> {
        let Some(transport) = &self.transport else {
            return Err(GatewayError::Configuration(format!(
                "DeepSeek API key is not set (set {} or providers.deepseek.api_key)",
                self.settings.api_key_env
            )));
        };
        transport.post(&self.request_body(messages)).await
    }
}
