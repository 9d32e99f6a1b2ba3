//! Conversation orchestrator.
//!
//! Owns the conversation history and drives one user turn as a bounded
//! loop of model calls and tool executions:
//!
//! ```text
//! AWAIT_MODEL ──(no tool markup)──────────────────────────────▶ DONE
//!      │
//!      └─(tool markup)─▶ EXECUTE_TOOLS ─(markers remain)─▶ AWAIT_MODEL
//!                              │
//!                              └─(all resolved)─▶ AWAIT_JUDGMENT
//!                                                   │
//!                        (reply calls tools) ◀──────┤
//!                          ▶ AWAIT_MODEL            └─(final)─▶ DONE
//! ```
//!
//! The number of `AWAIT_MODEL` calls is capped by
//! [`ExecutionParams::max_rounds`]; running out produces a timeout
//! placeholder instead of an answer. The judgment question is sent on a
//! snapshot of the history and never persisted.

use std::sync::Arc;

use hostagent_domain::util::{preview, truncate_str};
use hostagent_domain::{ConversationHistory, Message, PromptTemplate, TIMEOUT_RESULT};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::TurnProgressNotifier;
use crate::ports::prompt_service::PromptServicePort;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::refine_result::{RefineInput, RefineResultUseCase};
use crate::use_cases::tool_invocation::{InvocationRecord, ToolInvocationEngine};

const UNKNOWN_TOOL: &str = "unknown tool";
const NO_RESULT: &str = "no result";
const DEFAULT_USER_CONTEXT: &str = "user request";

/// Errors that end a turn without an answer.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("Model call failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Result of one user turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutput {
    /// Text shown to the user (refined when refinement succeeded)
    pub answer: String,
    /// Final result before refinement
    pub raw_result: String,
    /// Number of main-loop model calls
    pub rounds: usize,
    /// Whether `answer` came from refinement
    pub refined: bool,
    /// Whether the round limit was hit
    pub timed_out: bool,
}

pub struct ConversationOrchestrator {
    gateway: Arc<dyn LlmGateway>,
    engine: ToolInvocationEngine,
    refiner: RefineResultUseCase,
    params: ExecutionParams,
    history: ConversationHistory,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ConversationOrchestrator {
    /// Create an orchestrator whose history is seeded with the system prompt
    /// built from the executor's tool catalogue.
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        prompts: Arc<dyn PromptServicePort>,
        params: ExecutionParams,
    ) -> Self {
        let history = ConversationHistory::new(PromptTemplate::system_prompt(
            tool_executor.tool_spec(),
        ));
        info!(
            "Initialized system prompt with {} tool(s)",
            tool_executor.tool_spec().len()
        );
        let refiner =
            RefineResultUseCase::new(gateway.clone(), prompts, params.refinement_prompt.clone());

        Self {
            gateway,
            engine: ToolInvocationEngine::new(tool_executor),
            refiner,
            params,
            history,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.engine = self.engine.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    pub fn gateway(&self) -> &Arc<dyn LlmGateway> {
        &self.gateway
    }

    pub fn tool_executor(&self) -> &Arc<dyn ToolExecutorPort> {
        self.engine.executor()
    }

    /// Discard the history and re-seed it from the current tool catalogue.
    pub fn clear_history(&mut self) {
        let system_prompt = PromptTemplate::system_prompt(self.engine.executor().tool_spec());
        self.history.reset(system_prompt);
        info!("Conversation history cleared");
    }

    /// Run one user turn to completion.
    pub async fn handle_user_input(
        &mut self,
        input: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutput, TurnError> {
        info!("Starting turn: {}", truncate_str(input, 100));
        self.history.push_user(input);
        self.conversation_logger
            .log(ConversationEvent::user_input(input));

        if self.params.calculation_hint && PromptTemplate::needs_calculation_hint(input) {
            debug!("Calculation request detected, adding reminder");
            self.history
                .push_system(PromptTemplate::calculation_reminder());
            progress.on_calculation_hint();
        }

        let max_rounds = self.params.max_rounds;
        let mut rounds = 0;
        let mut final_result = None;
        let mut invocations: Vec<InvocationRecord> = Vec::new();

        while rounds < max_rounds {
            rounds += 1;
            info!("Round {}/{}", rounds, max_rounds);
            progress.on_round_start(rounds, max_rounds);

            let assistant = self
                .call_model(self.history.messages(), progress)
                .await?;
            self.conversation_logger.log(ConversationEvent::model_reply(
                rounds,
                &self.gateway.current_provider(),
                &assistant,
            ));

            if !self.engine.contains_tool_call(&assistant) {
                debug!("No tool call in reply, using it as the final result");
                self.history.push_assistant(assistant.clone());
                final_result = Some(assistant);
                break;
            }

            let processed = self.engine.process_tool_calls(&assistant, progress).await;
            invocations.extend(processed.invocations);
            let still_has_calls = self.engine.contains_tool_call(&processed.text);
            self.history.push_assistant(processed.text);

            if still_has_calls {
                debug!("Unresolved tool markup remains, continuing");
                continue;
            }

            let snapshot = self
                .history
                .snapshot_with(Message::user(PromptTemplate::judgment_prompt()));
            let judgment = self.call_model(&snapshot, progress).await?;
            let continues = self.engine.contains_tool_call(&judgment);
            progress.on_judgment(&judgment, continues);
            self.conversation_logger
                .log(ConversationEvent::judgment(rounds, &judgment, continues));

            if continues {
                info!("Model requested more tool calls");
                self.history.push_assistant(judgment);
            } else {
                info!("Model considers the work complete");
                final_result = Some(judgment);
                break;
            }
        }

        // Using up the last round ends the turn with the placeholder, even
        // when that round produced an answer
        let timed_out = rounds >= max_rounds;
        let raw_result = match final_result {
            Some(result) if !timed_out => result,
            _ => {
                warn!("Reached the round limit ({})", max_rounds);
                progress.on_round_limit(max_rounds);
                TIMEOUT_RESULT.to_string()
            }
        };
        self.conversation_logger.log(ConversationEvent::final_result(
            &raw_result,
            rounds,
            timed_out,
        ));

        let (answer, refined) = if self.params.refine {
            self.refine(&raw_result, &invocations, progress).await
        } else {
            (raw_result.clone(), false)
        };
        self.conversation_logger
            .log(ConversationEvent::refined_result(&answer, refined));

        Ok(TurnOutput {
            answer,
            raw_result,
            rounds,
            refined,
            timed_out,
        })
    }

    async fn call_model(
        &self,
        messages: &[Message],
        progress: &dyn TurnProgressNotifier,
    ) -> Result<String, GatewayError> {
        progress.on_model_call_start(&self.gateway.current_provider());
        let response = self.gateway.chat(messages).await;
        progress.on_model_call_end();

        let raw = response?;
        let text = self.gateway.extract_assistant_message(&raw);
        debug!("Model reply: {}", preview(&text, 500));
        progress.on_model_reply(&text);
        Ok(text)
    }

    /// Refine `raw_result`, falling back to it unchanged on any failure.
    async fn refine(
        &self,
        raw_result: &str,
        invocations: &[InvocationRecord],
        progress: &dyn TurnProgressNotifier,
    ) -> (String, bool) {
        progress.on_refinement_start();
        let last = invocations.last();

        let input = RefineInput {
            tool_name: self
                .engine
                .extract_tool_name(raw_result)
                .or_else(|| last.map(|r| r.tool_name.clone()))
                .unwrap_or_else(|| UNKNOWN_TOOL.to_string()),
            tool_result: self
                .engine
                .extract_tool_result(raw_result)
                .or_else(|| last.map(|r| r.text.clone()))
                .unwrap_or_else(|| NO_RESULT.to_string()),
            user_message: self
                .history
                .last_user_message()
                .unwrap_or(DEFAULT_USER_CONTEXT)
                .to_string(),
        };

        match self.refiner.execute(&input).await {
            Ok(refined) => (refined, true),
            Err(e) => {
                warn!("Refinement failed, using the raw result: {}", e);
                progress.on_refinement_fallback(&e.to_string());
                (raw_result.to_string(), false)
            }
        }
    }
}
