//! Refine Result use case.
//!
//! Turns a raw final result into a user-facing explanation: the prompt
//! service renders guidance from the last tool call and the user's request,
//! and that guidance is sent to the model as a single user message in a
//! fresh conversation.

use std::sync::Arc;

use hostagent_domain::{Message, UNPARSABLE_RESPONSE};
use thiserror::Error;
use tracing::{debug, info};

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::prompt_service::{PromptArguments, PromptError, PromptServicePort};

/// Errors that can occur during refinement.
///
/// None of them is fatal to a turn; the orchestrator falls back to the raw
/// result.
#[derive(Error, Debug)]
pub enum RefineError {
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Model reply could not be parsed")]
    UnparsableReply,
}

/// Input for [`RefineResultUseCase`]
#[derive(Debug, Clone, PartialEq)]
pub struct RefineInput {
    pub tool_name: String,
    pub tool_result: String,
    pub user_message: String,
}

pub struct RefineResultUseCase {
    gateway: Arc<dyn LlmGateway>,
    prompts: Arc<dyn PromptServicePort>,
    prompt_name: String,
}

impl RefineResultUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        prompts: Arc<dyn PromptServicePort>,
        prompt_name: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            prompts,
            prompt_name: prompt_name.into(),
        }
    }

    pub async fn execute(&self, input: &RefineInput) -> Result<String, RefineError> {
        let mut arguments = PromptArguments::new();
        arguments.insert("tool_name".to_string(), input.tool_name.clone());
        arguments.insert("tool_result".to_string(), input.tool_result.clone());
        arguments.insert("user_context".to_string(), input.user_message.clone());

        info!(
            "Refining result with prompt '{}' (tool: {})",
            self.prompt_name, input.tool_name
        );
        let rendered = self.prompts.get_prompt(&self.prompt_name, &arguments).await?;
        let guidance = rendered
            .first_text()
            .ok_or_else(|| PromptError::EmptyPrompt(self.prompt_name.clone()))?;

        let raw = self.gateway.chat(&[Message::user(guidance)]).await?;
        let refined = self.gateway.extract_assistant_message(&raw);
        debug!("Refined result: {} bytes", refined.len());

        if refined == UNPARSABLE_RESPONSE || refined.trim().is_empty() {
            return Err(RefineError::UnparsableReply);
        }
        Ok(refined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::prompt_service::{PromptInfo, RenderedPrompt};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct EchoGateway {
        reply: Result<String, GatewayError>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl EchoGateway {
        fn replying(reply: Result<String, GatewayError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn chat(&self, messages: &[Message]) -> Result<String, GatewayError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.reply.clone()
        }

        fn extract_assistant_message(&self, raw: &str) -> String {
            raw.to_string()
        }

        fn current_provider(&self) -> String {
            "mock".to_string()
        }
    }

    struct FixedPrompts {
        result: Result<RenderedPrompt, PromptError>,
        seen: Mutex<Vec<PromptArguments>>,
    }

    #[async_trait]
    impl PromptServicePort for FixedPrompts {
        fn list_prompts(&self) -> Vec<PromptInfo> {
            vec![]
        }

        async fn get_prompt(
            &self,
            _name: &str,
            arguments: &PromptArguments,
        ) -> Result<RenderedPrompt, PromptError> {
            self.seen.lock().unwrap().push(arguments.clone());
            self.result.clone()
        }
    }

    fn input() -> RefineInput {
        RefineInput {
            tool_name: "calculator".to_string(),
            tool_result: "Result: 42".to_string(),
            user_message: "compute 6 * 7".to_string(),
        }
    }

    fn guidance(text: &str) -> Result<RenderedPrompt, PromptError> {
        Ok(RenderedPrompt {
            description: None,
            messages: vec![Message::user(text)],
        })
    }

    #[tokio::test]
    async fn test_refine_sends_guidance_as_single_user_message() {
        let gateway = Arc::new(EchoGateway::replying(Ok("6 times 7 is 42.".to_string())));
        let prompts = Arc::new(FixedPrompts {
            result: guidance("explain the result"),
            seen: Mutex::new(Vec::new()),
        });
        let use_case = RefineResultUseCase::new(gateway.clone(), prompts.clone(), "analyze_tool_result");

        let refined = use_case.execute(&input()).await.unwrap();

        assert_eq!(refined, "6 times 7 is 42.");
        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![Message::user("explain the result")]);

        let args = &prompts.seen.lock().unwrap()[0];
        assert_eq!(args["tool_name"], "calculator");
        assert_eq!(args["tool_result"], "Result: 42");
        assert_eq!(args["user_context"], "compute 6 * 7");
    }

    #[tokio::test]
    async fn test_refine_propagates_prompt_error() {
        let gateway = Arc::new(EchoGateway::replying(Ok("unused".to_string())));
        let prompts = Arc::new(FixedPrompts {
            result: Err(PromptError::NotFound("analyze_tool_result".to_string())),
            seen: Mutex::new(Vec::new()),
        });
        let use_case = RefineResultUseCase::new(gateway.clone(), prompts, "analyze_tool_result");

        let err = use_case.execute(&input()).await.unwrap_err();

        assert!(matches!(err, RefineError::Prompt(PromptError::NotFound(_))));
        assert!(gateway.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refine_rejects_empty_prompt_and_unparsable_reply() {
        let gateway = Arc::new(EchoGateway::replying(Ok(UNPARSABLE_RESPONSE.to_string())));
        let empty = Arc::new(FixedPrompts {
            result: guidance(""),
            seen: Mutex::new(Vec::new()),
        });
        let err = RefineResultUseCase::new(gateway.clone(), empty, "p")
            .execute(&input())
            .await
            .unwrap_err();
        assert!(matches!(err, RefineError::Prompt(PromptError::EmptyPrompt(_))));

        let prompts = Arc::new(FixedPrompts {
            result: guidance("explain"),
            seen: Mutex::new(Vec::new()),
        });
        let err = RefineResultUseCase::new(gateway, prompts, "p")
            .execute(&input())
            .await
            .unwrap_err();
        assert!(matches!(err, RefineError::UnparsableReply));
    }
}
