//! Progress notification port
//!
//! Defines the callbacks the orchestrator fires while driving a turn.
//! Implementations live in the presentation layer and render them on the
//! console; every method has a no-op default.

use hostagent_domain::{DomainError, ToolCall, ToolResult};

/// Callback for progress updates during a conversation turn
pub trait TurnProgressNotifier: Send + Sync {
    /// The calculation reminder was injected after the user message
    fn on_calculation_hint(&self) {}

    /// A new round starts (1-based)
    fn on_round_start(&self, _round: usize, _max_rounds: usize) {}

    /// A model call is about to be sent
    fn on_model_call_start(&self, _provider: &str) {}

    /// The model call returned (successfully or not)
    fn on_model_call_end(&self) {}

    /// Assistant text extracted from a model reply
    fn on_model_reply(&self, _text: &str) {}

    /// A tool call is about to run
    fn on_tool_call(&self, _call: &ToolCall) {}

    /// A tool call finished
    fn on_tool_result(&self, _result: &ToolResult) {}

    /// A delimited call block could not be parsed
    fn on_tool_call_rejected(&self, _error: &DomainError) {}

    /// The model answered the judgment question
    fn on_judgment(&self, _text: &str, _continues: bool) {}

    /// The round limit was reached without a final answer
    fn on_round_limit(&self, _max_rounds: usize) {}

    /// Refinement of the final result starts
    fn on_refinement_start(&self) {}

    /// Refinement failed and the raw result is used instead
    fn on_refinement_fallback(&self, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl TurnProgressNotifier for NoProgress {}
