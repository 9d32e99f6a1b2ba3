//! Infrastructure layer for hostagent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: chat-completions providers behind a failover
//! gateway, the local tool backend, the local prompt service, configuration
//! file loading and the JSONL transcript writer.

pub mod config;
pub mod logging;
pub mod prompts;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileAgentConfig, FileConfig, FileLoggingConfig,
    FileProvidersConfig, FileReplConfig, FileToolsConfig, Severity,
};
pub use logging::JsonlConversationLogger;
pub use prompts::LocalPromptService;
pub use providers::{FailoverGateway, ProviderClient, ProviderKind, build_providers};
pub use tools::{MemoryStore, ToolContext, ToolRegistry};
