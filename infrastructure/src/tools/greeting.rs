//! Greeting tool: a time-of-day greeting in English or Chinese

use chrono::Timelike;
use hostagent_domain::{ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult};

use super::LocalTool;

pub const GREETING: &str = "greeting";

pub struct GreetingTool;

impl GreetingTool {
    /// Greeting for `name` at the given local hour (0-23)
    pub fn compose(name: &str, language: &str, style: &str, hour: u32) -> String {
        let zh = language == "zh";
        let time_of_day = match hour {
            5..=11 if zh => "早上",
            5..=11 => "morning",
            12..=17 if zh => "下午",
            12..=17 => "afternoon",
            _ if zh => "晚上",
            _ => "evening",
        };

        match (zh, style == "formal") {
            (true, true) => format!("尊敬的 {}，{}好。希望您今天心情愉快！", name, time_of_day),
            (true, false) => format!("嘿 {}！{}好啊！今天过得怎么样？", name, time_of_day),
            (false, true) => format!(
                "Dear {}, good {}. I hope you're having a wonderful day!",
                name, time_of_day
            ),
            (false, false) => format!("Hey {}! How's your {} going?", name, time_of_day),
        }
    }
}

impl LocalTool for GreetingTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(GREETING, "Generate a greeting for a user")
            .with_parameter(ToolParameter::new("name", "User name", true))
            .with_parameter(
                ToolParameter::new("language", "Preferred language (en/zh)", false)
                    .with_allowed_values(["en", "zh"]),
            )
            .with_parameter(
                ToolParameter::new("style", "Greeting style (formal/casual)", false)
                    .with_allowed_values(["formal", "casual"]),
            )
    }

    fn execute(&self, call: &ToolCall) -> ToolResult {
        let name = match call.require_string("name") {
            Ok(name) => name,
            Err(e) => return ToolResult::failure(GREETING, ToolError::invalid_argument(e)),
        };
        let language = call.get_string("language").unwrap_or("en");
        let style = call.get_string("style").unwrap_or("casual");
        let hour = chrono::Local::now().hour();

        ToolResult::success(GREETING, Self::compose(name, language, style, hour))
    }
}
