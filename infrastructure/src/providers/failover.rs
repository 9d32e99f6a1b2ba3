//! Failover gateway over an ordered list of providers
//!
//! The current provider is sticky: after a failure the gateway moves on to
//! the next provider and stays there for later calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hostagent_application::{GatewayError, LlmGateway, ProviderFailure};
use hostagent_domain::Message;
use tracing::{error, info, warn};

use super::ProviderClient;

pub struct FailoverGateway {
    providers: Vec<Arc<dyn ProviderClient>>,
    /// Always a valid index into `providers`
    current: AtomicUsize,
}

impl FailoverGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderClient>>) -> Result<Self, GatewayError> {
        if providers.is_empty() {
            return Err(GatewayError::NoProviders);
        }
        Ok(Self {
            providers,
            current: AtomicUsize::new(0),
        })
    }

    pub fn current_index(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    fn current_client(&self) -> &Arc<dyn ProviderClient> {
        &self.providers[self.current_index()]
    }

    fn log_config_hint(provider: &str, err: &GatewayError) {
        if err.is_authentication() {
            warn!(
                "Hint: provider '{}' rejected the credentials; check its API key setting",
                provider
            );
        } else if err.to_string().contains("max_tokens") {
            warn!(
                "Hint: provider '{}' rejected max_tokens; lower providers.{}.max_tokens",
                provider, provider
            );
        }
    }
}

#[async_trait]
impl LlmGateway for FailoverGateway {
    async fn chat(&self, messages: &[Message]) -> Result<String, GatewayError> {
        let count = self.providers.len();
        let mut failures = Vec::with_capacity(count);

        for attempt in 0..count {
            let index = self.current_index();
            let provider = &self.providers[index];

            match provider.chat(messages).await {
                Ok(raw) => {
                    if attempt > 0 {
                        info!("Provider '{}' succeeded after failover", provider.name());
                    }
                    return Ok(raw);
                }
                Err(e) => {
                    let next = (index + 1) % count;
                    warn!(
                        "Provider '{}' failed ({}); switching to '{}'",
                        provider.name(),
                        e,
                        self.providers[next].name()
                    );
                    Self::log_config_hint(provider.name(), &e);
                    failures.push(ProviderFailure::new(provider.name(), e.to_string()));
                    self.current.store(next, Ordering::SeqCst);
                }
            }
        }

        let err = GatewayError::AllProvidersFailed(failures);
        error!("{}", err);
        Err(err)
    }

    fn extract_assistant_message(&self, raw: &str) -> String {
        self.current_client().extract_assistant_message(raw)
    }

    fn current_provider(&self) -> String {
        self.current_client().name().to_string()
    }

    fn providers(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    fn switch_to(&self, index: usize) -> bool {
        if index >= self.providers.len() {
            return false;
        }
        self.current.store(index, Ordering::SeqCst);
        info!("Switched to provider '{}'", self.providers[index].name());
        true
    }
}
