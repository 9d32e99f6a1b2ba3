//! Local prompt service
//!
//! Renders the refinement prompts from [`PromptTemplate`] without any
//! external backend.

use async_trait::async_trait;
use hostagent_application::{
    PromptArgument, PromptArguments, PromptError, PromptInfo, PromptServicePort, RenderedPrompt,
};
use hostagent_domain::{Message, PromptLanguage, PromptTemplate, ResultType};
use tracing::debug;

pub const ANALYZE_TOOL_RESULT: &str = "analyze_tool_result";
pub const TOOL_RESULT: &str = "tool_result";

/// Used when `analyze_tool_result` gets no `user_context`
const DEFAULT_USER_CONTEXT: &str = "user request";

#[derive(Debug, Clone, Default)]
pub struct LocalPromptService;

impl LocalPromptService {
    pub fn new() -> Self {
        Self
    }

    fn required<'a>(
        arguments: &'a PromptArguments,
        prompt: &str,
        name: &str,
    ) -> Result<&'a str, PromptError> {
        arguments
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| {
                PromptError::InvalidArguments(format!(
                    "{}: missing required argument '{}'",
                    prompt, name
                ))
            })
    }

    fn render_analysis(arguments: &PromptArguments) -> Result<RenderedPrompt, PromptError> {
        let tool_name = Self::required(arguments, ANALYZE_TOOL_RESULT, "tool_name")?;
        let tool_result = Self::required(arguments, ANALYZE_TOOL_RESULT, "tool_result")?;
        let user_context = arguments
            .get("user_context")
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_USER_CONTEXT);

        Ok(RenderedPrompt {
            description: Some(format!("Analysis of the {} result", tool_name)),
            messages: vec![Message::user(PromptTemplate::analyze_tool_result(
                tool_name,
                tool_result,
                user_context,
            ))],
        })
    }

    fn render_tool_result(arguments: &PromptArguments) -> Result<RenderedPrompt, PromptError> {
        let tool_name = Self::required(arguments, TOOL_RESULT, "tool_name")?;
        let content = Self::required(arguments, TOOL_RESULT, "result_content")?;

        let result_type = match arguments.get("result_type") {
            None => ResultType::Success,
            Some(s) => ResultType::parse(s).ok_or_else(|| {
                PromptError::InvalidArguments(format!(
                    "{}: result_type must be success, error or partial, got '{}'",
                    TOOL_RESULT, s
                ))
            })?,
        };
        let language = match arguments.get("language") {
            None => PromptLanguage::default(),
            Some(s) => PromptLanguage::parse(s).ok_or_else(|| {
                PromptError::InvalidArguments(format!(
                    "{}: language must be zh or en, got '{}'",
                    TOOL_RESULT, s
                ))
            })?,
        };

        Ok(RenderedPrompt {
            description: Some(format!("Result of {} ({})", tool_name, result_type.as_str())),
            messages: vec![
                Message::assistant(PromptTemplate::tool_result_guidance(
                    tool_name,
                    result_type,
                    language,
                )),
                Message::assistant(PromptTemplate::tool_result_body(
                    content,
                    result_type,
                    language,
                )),
            ],
        })
    }
}

#[async_trait]
impl PromptServicePort for LocalPromptService {
    fn list_prompts(&self) -> Vec<PromptInfo> {
        vec![
            PromptInfo {
                name: ANALYZE_TOOL_RESULT.to_string(),
                description: "Explain a tool result to the user".to_string(),
                arguments: vec![
                    PromptArgument::new("tool_name", "Name of the tool that ran", true),
                    PromptArgument::new("tool_result", "Raw tool output", true),
                    PromptArgument::new("user_context", "The user's original request", false),
                ],
            },
            PromptInfo {
                name: TOOL_RESULT.to_string(),
                description: "Format a tool result by outcome and language".to_string(),
                arguments: vec![
                    PromptArgument::new("tool_name", "Name of the tool that ran", true),
                    PromptArgument::new("result_content", "Raw tool output", true),
                    PromptArgument::new("result_type", "success, error or partial", false),
                    PromptArgument::new("language", "zh or en", false),
                ],
            },
        ]
    }

    async fn get_prompt(
        &self,
        name: &str,
        arguments: &PromptArguments,
    ) -> Result<RenderedPrompt, PromptError> {
        debug!("Rendering prompt '{}'", name);
        match name {
            ANALYZE_TOOL_RESULT => Self::render_analysis(arguments),
            TOOL_RESULT => Self::render_tool_result(arguments),
            other => Err(PromptError::NotFound(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostagent_domain::Role;

    fn args(pairs: &[(&str, &str)]) -> PromptArguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_analyze_tool_result_renders_context() {
        let prompt = LocalPromptService::new()
            .get_prompt(
                ANALYZE_TOOL_RESULT,
                &args(&[
                    ("tool_name", "calculator"),
                    ("tool_result", "Result: 42"),
                    ("user_context", "compute 6 * 7"),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(prompt.messages.len(), 1);
        assert_eq!(prompt.messages[0].role, Role::User);
        let text = prompt.first_text().unwrap();
        assert!(text.contains("- User request: compute 6 * 7"));
        assert!(text.contains("- Tool used: calculator"));
        assert!(text.contains("- Result: Result: 42"));
    }

    #[tokio::test]
    async fn test_analyze_defaults_user_context() {
        let prompt = LocalPromptService::new()
            .get_prompt(
                ANALYZE_TOOL_RESULT,
                &args(&[("tool_name", "calculator"), ("tool_result", "Result: 42")]),
            )
            .await
            .unwrap();

        assert!(prompt.first_text().unwrap().contains("- User request: user request"));
    }

    #[tokio::test]
    async fn test_tool_result_language_and_type() {
        let prompt = LocalPromptService::new()
            .get_prompt(
                TOOL_RESULT,
                &args(&[
                    ("tool_name", "calculator"),
                    ("result_content", "Division by zero is not allowed."),
                    ("result_type", "error"),
                    ("language", "en"),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(prompt.messages.len(), 2);
        assert!(prompt.messages[0].content.contains("Execution Error"));
        assert!(prompt.messages[1].content.contains("Division by zero is not allowed."));
    }

    #[tokio::test]
    async fn test_tool_result_defaults_to_chinese_success() {
        let prompt = LocalPromptService::new()
            .get_prompt(
                TOOL_RESULT,
                &args(&[("tool_name", "calculator"), ("result_content", "Result: 42")]),
            )
            .await
            .unwrap();

        assert!(prompt.messages[0].content.contains("执行成功"));
        assert!(prompt.messages[1].content.starts_with("工具执行成功！"));
    }

    #[tokio::test]
    async fn test_errors() {
        let service = LocalPromptService::new();

        let err = service.get_prompt("summarize", &args(&[])).await.unwrap_err();
        assert_eq!(err, PromptError::NotFound("summarize".to_string()));

        let err = service
            .get_prompt(ANALYZE_TOOL_RESULT, &args(&[("tool_name", "calculator")]))
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidArguments(ref m) if m.contains("tool_result")));

        let err = service
            .get_prompt(
                TOOL_RESULT,
                &args(&[
                    ("tool_name", "calculator"),
                    ("result_content", "x"),
                    ("language", "fr"),
                ]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidArguments(_)));
    }

    #[test]
    fn test_list_prompts() {
        let prompts = LocalPromptService::new().list_prompts();
        let names: Vec<&str> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec![ANALYZE_TOOL_RESULT, TOOL_RESULT]);
        assert!(prompts[0].arguments.iter().any(|a| a.name == "user_context" && !a.required));
    }
}
