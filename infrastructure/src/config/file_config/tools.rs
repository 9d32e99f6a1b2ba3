//! Tools configuration from TOML (`[tools]` section)
//!
//! ```toml
//! [tools]
//! enabled = ["calculator", "greeting", "weather", "memory"]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::validation::{ConfigIssue, ConfigIssueCode};
use crate::tools::BUILTIN_TOOL_NAMES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Built-in tools to register, in registration order
    pub enabled: Vec<String>,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            enabled: BUILTIN_TOOL_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FileToolsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.enabled
            .iter()
            .filter(|name| !BUILTIN_TOOL_NAMES.contains(&name.as_str()))
            .map(|name| {
                ConfigIssue::warning(
                    ConfigIssueCode::UnknownTool { name: name.clone() },
                    format!(
                        "tools.enabled: unknown tool '{}' is ignored (available: {})",
                        name,
                        BUILTIN_TOOL_NAMES.join(", ")
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_all_builtins() {
        let config = FileToolsConfig::default();
        assert_eq!(config.enabled, vec!["calculator", "greeting", "weather", "memory"]);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_tool_warns() {
        let config = FileToolsConfig {
            enabled: vec!["calculator".to_string(), "stock_quote".to_string()],
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert!(issues[0].message.contains("stock_quote"));
    }
}
