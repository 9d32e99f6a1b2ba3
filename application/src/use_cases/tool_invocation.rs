//! Tool invocation engine.
//!
//! Scans assistant text for tool-call markup, executes every call against
//! the [`ToolExecutorPort`] strictly left to right, and rebuilds the text
//! with a result or error marker in place of each call. A single failing
//! call never aborts the pass.

use std::sync::Arc;

use hostagent_domain::tool::markup::{self, Segment};
use hostagent_domain::util::preview;
use hostagent_domain::{ToolCall, ToolResult};
use tracing::{debug, info, warn};

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::TurnProgressNotifier;
use crate::ports::tool_executor::ToolExecutorPort;

/// One executed (or rejected) call from a processing pass
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    pub tool_name: String,
    pub success: bool,
    /// Text that was spliced in place of the call
    pub text: String,
}

/// Output of [`ToolInvocationEngine::process_tool_calls`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedMessage {
    /// Input text with every located call replaced
    pub text: String,
    /// Calls in the order they were handled
    pub invocations: Vec<InvocationRecord>,
}

impl ProcessedMessage {
    pub fn last_invocation(&self) -> Option<&InvocationRecord> {
        self.invocations.last()
    }
}

pub struct ToolInvocationEngine {
    executor: Arc<dyn ToolExecutorPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for ToolInvocationEngine {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl ToolInvocationEngine {
    pub fn new(executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            executor,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn executor(&self) -> &Arc<dyn ToolExecutorPort> {
        &self.executor
    }

    pub fn contains_tool_call(&self, text: &str) -> bool {
        markup::contains_tool_call(text)
    }

    /// Name of the first call block in `text`.
    pub fn extract_tool_name(&self, text: &str) -> Option<String> {
        markup::extract_tool_name(text)
    }

    /// Content of the first result marker in `text`.
    pub fn extract_tool_result(&self, text: &str) -> Option<String> {
        markup::extract_tool_result(text)
    }

    /// Execute every call in `text` and splice the outcomes back in.
    ///
    /// Calls are located on the original text only; a result produced
    /// earlier in the pass is never re-scanned.
    pub async fn process_tool_calls(
        &self,
        text: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> ProcessedMessage {
        let mut output = String::with_capacity(text.len());
        let mut invocations = Vec::new();

        for segment in markup::scan(text) {
            match segment {
                Segment::Text(literal) => output.push_str(literal),
                Segment::Call {
                    parsed: Ok(call), ..
                } => {
                    let result = self.invoke(&call, progress).await;
                    let spliced = if result.is_success() {
                        markup::result_splice(&result.text())
                    } else {
                        markup::error_splice(&result.text())
                    };
                    output.push_str(&spliced);
                    invocations.push(InvocationRecord {
                        tool_name: call.tool_name,
                        success: result.is_success(),
                        text: result.text(),
                    });
                }
                Segment::Call {
                    raw,
                    parsed: Err(error),
                } => {
                    warn!("Rejected tool call block: {}", error);
                    progress.on_tool_call_rejected(&error);
                    let message = error.to_string();
                    output.push_str(&markup::error_splice(&message));
                    invocations.push(InvocationRecord {
                        tool_name: markup::extract_tool_name(raw)
                            .unwrap_or_else(|| "unknown tool".to_string()),
                        success: false,
                        text: message,
                    });
                }
            }
        }

        info!(
            "Processed {} tool call(s), {} failed",
            invocations.len(),
            invocations.iter().filter(|r| !r.success).count()
        );

        ProcessedMessage {
            text: output,
            invocations,
        }
    }

    async fn invoke(&self, call: &ToolCall, progress: &dyn TurnProgressNotifier) -> ToolResult {
        debug!(
            "Executing tool '{}' with {}",
            call.tool_name,
            preview(&call.arguments_json(), 200)
        );
        progress.on_tool_call(call);
        self.conversation_logger.log(ConversationEvent::tool_call(call));

        let result = self.executor.execute(call).await;

        if !result.is_success() {
            warn!("Tool '{}' failed: {}", call.tool_name, result.text());
        }
        progress.on_tool_result(&result);
        self.conversation_logger
            .log(ConversationEvent::tool_result(&result));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use hostagent_domain::{ToolDefinition, ToolError, ToolSpec};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Calculator-only executor that records every call it receives
    struct RecordingExecutor {
        spec: ToolSpec,
        calls: Mutex<Vec<ToolCall>>,
    }

    impl RecordingExecutor {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new().register(ToolDefinition::new("calculator", "Arithmetic")),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<ToolCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ToolExecutorPort for RecordingExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            self.calls.lock().unwrap().push(call.clone());
            if call.tool_name != "calculator" {
                return ToolResult::failure(
                    &call.tool_name,
                    ToolError::not_found(format!("tool '{}'", call.tool_name)),
                );
            }
            let a = call.get_number("a").unwrap_or_default();
            let b = call.get_number("b").unwrap_or_default();
            match call.get_string("operation") {
                Some("multiply") => ToolResult::success("calculator", format!("Result: {}", a * b)),
                Some("add") => ToolResult::success("calculator", format!("Result: {}", a + b)),
                _ => ToolResult::failure("calculator", ToolError::invalid_argument("bad operation")),
            }
        }
    }

    fn call_block(name: &str, args: &str) -> String {
        format!("【工具调用】\n工具名称: {}\n参数: {}\n【工具调用结束】", name, args)
    }

    fn engine() -> (Arc<RecordingExecutor>, ToolInvocationEngine) {
        let executor = Arc::new(RecordingExecutor::new());
        let engine = ToolInvocationEngine::new(executor.clone());
        (executor, engine)
    }

    #[tokio::test]
    async fn test_single_call_is_replaced_by_result() {
        let (_, engine) = engine();
        let text = format!(
            "Let me compute.\n{}",
            call_block("calculator", r#"{"operation": "multiply", "a": 6, "b": 7}"#)
        );

        let processed = engine.process_tool_calls(&text, &NoProgress).await;

        assert_eq!(
            processed.text,
            "Let me compute.\n【工具执行结果】Result: 42【结果结束】"
        );
        assert!(!engine.contains_tool_call(&processed.text));
        assert_eq!(processed.invocations.len(), 1);
        assert!(processed.invocations[0].success);
    }

    #[tokio::test]
    async fn test_calls_execute_left_to_right_and_keep_literals() {
        let (executor, engine) = engine();
        let text = format!(
            "A{}B{}C",
            call_block("calculator", r#"{"operation": "multiply", "a": 2, "b": 3}"#),
            call_block("calculator", r#"{"operation": "add", "a": 1, "b": 1}"#)
        );

        let processed = engine.process_tool_calls(&text, &NoProgress).await;

        assert_eq!(
            processed.text,
            "A【工具执行结果】Result: 6【结果结束】B【工具执行结果】Result: 2【结果结束】C"
        );
        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].get_string("operation"), Some("multiply"));
        assert_eq!(calls[1].get_string("operation"), Some("add"));
    }

    #[tokio::test]
    async fn test_bad_json_becomes_error_splice_and_processing_continues() {
        let (executor, engine) = engine();
        let text = format!(
            "{} then {}",
            call_block("calculator", "{bad json"),
            call_block("calculator", r#"{"operation": "add", "a": 2, "b": 2}"#)
        );

        let processed = engine.process_tool_calls(&text, &NoProgress).await;

        assert!(processed.text.starts_with("【工具调用失败】Failed to parse tool arguments:"));
        assert!(processed.text.ends_with(" then 【工具执行结果】Result: 4【结果结束】"));
        assert_eq!(executor.calls().len(), 1);
        assert_eq!(processed.invocations.len(), 2);
        assert!(!processed.invocations[0].success);
        assert_eq!(processed.invocations[0].tool_name, "calculator");
    }

    #[tokio::test]
    async fn test_tool_failure_becomes_error_splice() {
        let (_, engine) = engine();
        let text = call_block("weather", r#"{"city": "Paris"}"#);

        let processed = engine.process_tool_calls(&text, &NoProgress).await;

        assert_eq!(
            processed.text,
            "【工具调用失败】[NOT_FOUND] Not found: tool 'weather'【错误结束】"
        );
        assert_eq!(processed.last_invocation().unwrap().tool_name, "weather");
    }

    #[tokio::test]
    async fn test_unclosed_call_is_left_intact() {
        let (executor, engine) = engine();
        let text = "【工具调用】\n工具名称: calculator\n参数: {}";

        assert!(!engine.contains_tool_call(text));
        let processed = engine.process_tool_calls(text, &NoProgress).await;

        assert_eq!(processed.text, text);
        assert!(processed.invocations.is_empty());
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_extract_helpers() {
        let (_, engine) = engine();
        let text = call_block("calculator", "{}");
        assert_eq!(engine.extract_tool_name(&text), Some("calculator".to_string()));
        assert_eq!(
            engine.extract_tool_result("x【工具执行结果】Result: 1【结果结束】"),
            Some("Result: 1".to_string())
        );
    }
}
