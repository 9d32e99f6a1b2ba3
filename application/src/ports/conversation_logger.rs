//! Port for structured conversation logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the turn
//! transcript (user input, model replies, tool calls, final answers) in a
//! machine-readable format such as JSONL.

use hostagent_domain::{ToolCall, ToolResult};
use serde_json::{Value, json};

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "user_input", "tool_call").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn user_input(text: &str) -> Self {
        Self::new("user_input", json!({ "text": text }))
    }

    pub fn model_reply(round: usize, provider: &str, text: &str) -> Self {
        Self::new(
            "model_reply",
            json!({ "round": round, "provider": provider, "text": text }),
        )
    }

    pub fn tool_call(call: &ToolCall) -> Self {
        Self::new(
            "tool_call",
            json!({ "tool": call.tool_name, "arguments": call.arguments }),
        )
    }

    pub fn tool_result(result: &ToolResult) -> Self {
        Self::new(
            "tool_result",
            json!({
                "tool": result.tool_name,
                "success": result.is_success(),
                "text": result.text(),
            }),
        )
    }

    pub fn judgment(round: usize, text: &str, continues: bool) -> Self {
        Self::new(
            "judgment",
            json!({ "round": round, "text": text, "continues": continues }),
        )
    }

    pub fn final_result(text: &str, rounds: usize, timed_out: bool) -> Self {
        Self::new(
            "final_result",
            json!({ "text": text, "rounds": rounds, "timed_out": timed_out }),
        )
    }

    pub fn refined_result(text: &str, refined: bool) -> Self {
        Self::new("refined_result", json!({ "text": text, "refined": refined }))
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; write failures are the adapter's
/// problem and never reach the turn.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_event_payload() {
        let call = ToolCall::new("calculator").with_arg("a", 6);
        let event = ConversationEvent::tool_call(&call);
        assert_eq!(event.event_type, "tool_call");
        assert_eq!(event.payload["tool"], "calculator");
        assert_eq!(event.payload["arguments"]["a"], 6);
    }

    #[test]
    fn test_tool_result_event_uses_result_text() {
        let result = ToolResult::success("calculator", "Result: 42");
        let event = ConversationEvent::tool_result(&result);
        assert_eq!(event.payload["success"], true);
        assert_eq!(event.payload["text"], "Result: 42");
    }
}
