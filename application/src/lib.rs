//! Application layer for hostagent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, ProviderFailure},
    progress::{NoProgress, TurnProgressNotifier},
    prompt_service::{
        PromptArgument, PromptArguments, PromptError, PromptInfo, PromptServicePort,
        RenderedPrompt,
    },
    tool_executor::ToolExecutorPort,
};
pub use use_cases::conversation::{ConversationOrchestrator, TurnError, TurnOutput};
pub use use_cases::refine_result::{RefineError, RefineInput, RefineResultUseCase};
pub use use_cases::tool_invocation::{InvocationRecord, ProcessedMessage, ToolInvocationEngine};
