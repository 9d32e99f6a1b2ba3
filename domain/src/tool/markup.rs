//! Tool-call markup embedded in assistant text
//!
//! The model requests a tool by writing a block like:
//!
//! ```text
//! 【工具调用】
//! 工具名称: calculator
//! 参数: {"operation": "multiply", "a": 6, "b": 7}
//! 【工具调用结束】
//! ```
//!
//! Scanning happens in two passes:
//!
//! 1. [`locate_calls`] finds delimiter pairs left to right. When an opening
//!    marker is followed by another opening marker before the close, the
//!    innermost one wins and the outer marker stays in the text. An
//!    opening marker without a close is not a call.
//! 2. [`parse_block`] parses the header and JSON payload between a pair.
//!
//! [`scan`] combines both into a list of [`Segment`]s so callers can
//! rebuild the message with every call replaced, keeping the literal
//! text between calls untouched.

use serde_json::Value;

use super::entities::ToolCall;
use crate::core::error::DomainError;

pub const CALL_OPEN: &str = "【工具调用】";
pub const CALL_CLOSE: &str = "【工具调用结束】";
pub const NAME_LABEL: &str = "工具名称:";
pub const ARGS_LABEL: &str = "参数:";

pub const RESULT_OPEN: &str = "【工具执行结果】";
pub const RESULT_CLOSE: &str = "【结果结束】";
pub const ERROR_OPEN: &str = "【工具调用失败】";
pub const ERROR_CLOSE: &str = "【错误结束】";

/// Byte range of one delimiter pair inside a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSpan {
    /// Start of the opening marker
    pub start: usize,
    /// End of the closing marker (exclusive)
    pub end: usize,
}

impl CallSpan {
    /// Text between the two markers.
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + CALL_OPEN.len()..self.end - CALL_CLOSE.len()]
    }
}

/// A piece of scanned assistant text.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Literal text, preserved as-is
    Text(&'a str),
    /// A delimited call block and the outcome of parsing it
    Call {
        raw: &'a str,
        parsed: Result<ToolCall, DomainError>,
    },
}

/// Whether the text holds an opening marker followed somewhere by a
/// closing marker. Structure is not validated.
pub fn contains_tool_call(text: &str) -> bool {
    text.find(CALL_OPEN)
        .is_some_and(|open| text[open + CALL_OPEN.len()..].contains(CALL_CLOSE))
}

/// First pass: locate balanced delimiter pairs, left to right.
pub fn locate_calls(text: &str) -> Vec<CallSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(rel_open) = text[cursor..].find(CALL_OPEN) {
        let open = cursor + rel_open;
        let body_start = open + CALL_OPEN.len();
        let Some(rel_close) = text[body_start..].find(CALL_CLOSE) else {
            break;
        };
        let close = body_start + rel_close;

        // Innermost opening marker before this close
        let start = match text[body_start..close].rfind(CALL_OPEN) {
            Some(rel) => body_start + rel,
            None => open,
        };
        let end = close + CALL_CLOSE.len();

        spans.push(CallSpan { start, end });
        cursor = end;
    }

    spans
}

/// Second pass: parse the text between a delimiter pair.
///
/// The body must be a `工具名称:` line followed by `参数:` and a JSON
/// object. A body holding any other bracketed marker is rejected.
pub fn parse_block(body: &str) -> Result<ToolCall, DomainError> {
    if body.contains('【') {
        return Err(DomainError::MalformedToolCall(
            "unexpected marker inside tool call".to_string(),
        ));
    }

    let rest = body.trim_start();
    let rest = rest.strip_prefix(NAME_LABEL).ok_or_else(|| {
        DomainError::MalformedToolCall(format!("missing '{}' line", NAME_LABEL))
    })?;

    let (name_line, rest) = rest.split_once('\n').unwrap_or((rest, ""));
    let name = name_line.trim();
    if name.is_empty() {
        return Err(DomainError::MalformedToolCall("empty tool name".to_string()));
    }

    let args = rest
        .trim_start()
        .strip_prefix(ARGS_LABEL)
        .ok_or_else(|| DomainError::MalformedToolCall(format!("missing '{}' line", ARGS_LABEL)))?
        .trim();

    let value: Value =
        serde_json::from_str(args).map_err(|e| DomainError::InvalidArguments(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(ToolCall::new(name).with_arguments(map)),
        other => Err(DomainError::ArgumentsNotObject(json_type(&other).to_string())),
    }
}

/// Split text into literal segments and call blocks.
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for span in locate_calls(text) {
        if span.start > cursor {
            segments.push(Segment::Text(&text[cursor..span.start]));
        }
        segments.push(Segment::Call {
            raw: &text[span.start..span.end],
            parsed: parse_block(span.body(text)),
        });
        cursor = span.end;
    }

    if cursor < text.len() {
        segments.push(Segment::Text(&text[cursor..]));
    }

    segments
}

/// Name in the first call block's header, best effort.
pub fn extract_tool_name(text: &str) -> Option<String> {
    let open = text.find(CALL_OPEN)?;
    let rest = text[open + CALL_OPEN.len()..].trim_start();
    let rest = rest.strip_prefix(NAME_LABEL)?;
    let name = rest.lines().next()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Content of the first result marker, best effort.
pub fn extract_tool_result(text: &str) -> Option<String> {
    let open = text.find(RESULT_OPEN)?;
    let rest = &text[open + RESULT_OPEN.len()..];
    let close = rest.find(RESULT_CLOSE)?;
    let content = rest[..close].trim();
    (!content.is_empty() && !content.contains('【')).then(|| content.to_string())
}

pub fn result_splice(content: &str) -> String {
    format!("{}{}{}", RESULT_OPEN, content, RESULT_CLOSE)
}

pub fn error_splice(message: &str) -> String {
    format!("{}{}{}", ERROR_OPEN, message, ERROR_CLOSE)
}

/// Render a call in the markup the scanner accepts.
pub fn render_call(call: &ToolCall) -> String {
    format!(
        "{}\n{} {}\n{} {}\n{}",
        CALL_OPEN,
        NAME_LABEL,
        call.tool_name,
        ARGS_LABEL,
        call.arguments_json(),
        CALL_CLOSE
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
