//! Interactive chat module
//!
//! Provides a line-editor based interactive chat over a
//! [`ConversationOrchestrator`](hostagent_application::ConversationOrchestrator).

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
