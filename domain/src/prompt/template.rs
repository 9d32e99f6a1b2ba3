//! Prompt templates for the tool-calling conversation

use crate::tool::entities::ToolSpec;
use crate::tool::markup::{ARGS_LABEL, CALL_CLOSE, CALL_OPEN, NAME_LABEL};

/// Placeholder answer when a turn runs out of rounds
pub const TIMEOUT_RESULT: &str = "processing timed out, please retry";

/// Fallback when a provider response has no assistant text
pub const UNPARSABLE_RESPONSE: &str = "unable to parse response";

/// Outcome class of a tool execution, for the `tool_result` prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Success,
    Error,
    Partial,
}

impl ResultType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(ResultType::Success),
            "error" => Some(ResultType::Error),
            "partial" => Some(ResultType::Partial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Success => "success",
            ResultType::Error => "error",
            ResultType::Partial => "partial",
        }
    }
}

/// Language of the `tool_result` prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptLanguage {
    #[default]
    Zh,
    En,
}

impl PromptLanguage {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "zh" => Some(PromptLanguage::Zh),
            "en" => Some(PromptLanguage::En),
            _ => None,
        }
    }
}

/// Templates for each stage of a turn
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt seeding every conversation.
    ///
    /// Lists each tool with its description and JSON schema, and teaches the
    /// call markup plus the multi-round calculation strategy.
    pub fn system_prompt(tools: &ToolSpec) -> String {
        let mut prompt = String::from(
            r#"# Assistant System Prompt

## Role
You are a helpful assistant. You can use tools to look up information or perform actions.

## Key Rules
**When the user asks for a calculation you MUST use the calculator tool instead of computing it yourself.**
**Do not just describe the steps of a calculation. Actually call the tool.**

## Available Tools
"#,
        );

        if tools.is_empty() {
            prompt.push_str("\n(no tools are currently available)\n");
        }
        for tool in tools.all() {
            prompt.push_str(&format!(
                "\n### {}\n- Description: {}\n- Parameters: {}\n",
                tool.name,
                tool.description,
                tool.input_schema()
            ));
        }

        prompt.push_str(&format!(
            r#"
## Tool Call Format
When you need a tool, write exactly:
{open}
{name} <tool name>
{args} <arguments as a JSON object>
{close}

## Calculation Rules
1. Always call the calculator tool, never compute by hand.
2. Break complex expressions into single operations.
3. Respect precedence: multiplication and division before addition and subtraction.
4. Call the tool once per operation.

## Example: the user says "compute 30 * 39 + 3 * 4 - 1"
I'll evaluate the multiplications first.

Step 1, 30 * 39:
{open}
{name} calculator
{args} {{"operation": "multiply", "a": 30, "b": 39}}
{close}

Step 2, 3 * 4:
{open}
{name} calculator
{args} {{"operation": "multiply", "a": 3, "b": 4}}
{close}

Steps 3 and 4 need the actual results of steps 1 and 2, so wait for them.

## Multi-round Strategy
1. Call every tool you can run right now with known values.
2. Wait for the tool results.
3. Use the returned values to make the next calls.
4. Repeat until the work is done, then give the final answer with a short summary of the steps.

## Reminders
- Never use placeholders such as <result of step 1>; wait for real values.
- Tool results appear in your own previous message between {result_open} and {result_close}.
"#,
            open = CALL_OPEN,
            close = CALL_CLOSE,
            name = NAME_LABEL,
            args = ARGS_LABEL,
            result_open = crate::tool::markup::RESULT_OPEN,
            result_close = crate::tool::markup::RESULT_CLOSE,
        ));

        prompt
    }

    /// Whether a user message looks like it asks for arithmetic.
    pub fn needs_calculation_hint(input: &str) -> bool {
        if input.contains(['*', '/', '+', '-']) || input.contains("计算") {
            return true;
        }
        let lower = input.to_lowercase();
        lower.contains("calculate") || lower.contains("compute")
    }

    /// System reminder appended after a calculation request
    pub fn calculation_reminder() -> &'static str {
        "Note: the user asked for a calculation. Use the calculator tool to perform it instead of only describing the steps."
    }

    /// Synthetic question asking the model whether the work is finished
    pub fn judgment_prompt() -> &'static str {
        "Analyse the tool results above. If the calculation is not finished (there are operations left to run), keep calling tools to complete it. If it is finished, give the final answer and a summary of how it was computed."
    }

    /// Guidance for turning a raw tool result into a user-facing answer
    pub fn analyze_tool_result(tool_name: &str, tool_result: &str, user_context: &str) -> String {
        format!(
            r#"As the assistant, analyse the following tool result and explain it to the user:

## Context
- User request: {user_context}
- Tool used: {tool_name}
- Result: {tool_result}

## Analysis Framework
Think through these steps:

1. **Understand the result**: what does the raw output mean?
2. **Check accuracy**: is the result plausible, especially numbers?
3. **User value**: turn the technical output into something meaningful for the user.
4. **Completeness**: is more information or another action needed?
5. **Next steps**: offer related help or suggestions.

## Answer Principles
- Use natural, friendly language
- Do not just repeat the raw output
- Make sure the user understands what the result means
- Offer further help where appropriate

Based on this framework, explain the tool result to the user:
"#
        )
    }

    /// Guidance header of the `tool_result` prompt
    pub fn tool_result_guidance(
        tool_name: &str,
        result_type: ResultType,
        language: PromptLanguage,
    ) -> String {
        match language {
            PromptLanguage::Zh => format!(
                "# 工具执行结果处理指南\n\n## 结果类型\n- 工具名称: {}\n- 执行状态: {}\n\n## 处理原则\n1. 准确理解结果内容\n2. 提供清晰的解释\n3. 给出后续建议\n4. 保持专业态度\n5. 主动提供帮助\n",
                tool_name,
                match result_type {
                    ResultType::Success => "执行成功",
                    ResultType::Error => "执行错误",
                    ResultType::Partial => "部分成功",
                }
            ),
            PromptLanguage::En => format!(
                "# Tool Execution Result Processing Guide\n\n## Result Type\n- Tool Name: {}\n- Execution Status: {}\n\n## Processing Principles\n1. Accurately understand the result content\n2. Provide clear explanations\n3. Give follow-up suggestions\n4. Maintain professionalism\n5. Proactively offer help\n",
                tool_name,
                match result_type {
                    ResultType::Success => "Execution Successful",
                    ResultType::Error => "Execution Error",
                    ResultType::Partial => "Partially Successful",
                }
            ),
        }
    }

    /// Result body of the `tool_result` prompt
    pub fn tool_result_body(content: &str, result_type: ResultType, language: PromptLanguage) -> String {
        match (language, result_type) {
            (PromptLanguage::Zh, ResultType::Success) => format!(
                "工具执行成功！\n\n执行结果：\n{}\n\n是否需要我为您进一步解释或提供其他帮助？",
                content
            ),
            (PromptLanguage::Zh, ResultType::Error) => format!(
                "工具执行遇到问题：\n\n错误信息：\n{}\n\n建议采取以下措施：\n1. 检查输入参数是否正确\n2. 确认系统状态是否正常\n3. 尝试使用替代方案\n\n需要我帮您尝试其他解决方案吗？",
                content
            ),
            (PromptLanguage::Zh, ResultType::Partial) => format!(
                "工具执行部分成功：\n\n当前结果：\n{}\n\n可能需要补充以下信息：\n1. 更详细的参数\n2. 额外的上下文信息\n3. 具体的需求说明\n\n请提供更多信息，我会继续协助您。",
                content
            ),
            (PromptLanguage::En, ResultType::Success) => format!(
                "Tool execution successful!\n\nResult:\n{}\n\nWould you like me to explain further or provide additional assistance?",
                content
            ),
            (PromptLanguage::En, ResultType::Error) => format!(
                "Tool execution encountered an issue:\n\nError message:\n{}\n\nSuggested actions:\n1. Check if input parameters are correct\n2. Verify system status\n3. Try alternative solutions\n\nWould you like me to try other solutions?",
                content
            ),
            (PromptLanguage::En, ResultType::Partial) => format!(
                "Tool execution partially successful:\n\nCurrent result:\n{}\n\nAdditional information may be needed:\n1. More detailed parameters\n2. Additional context\n3. Specific requirements\n\nPlease provide more information, and I'll continue to assist you.",
                content
            ),
        }
    }
}
