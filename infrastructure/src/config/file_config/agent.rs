//! Agent configuration from TOML (`[agent]` section)

use hostagent_application::ExecutionParams;
use serde::{Deserialize, Serialize};

use crate::config::validation::{ConfigIssue, ConfigIssueCode};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_rounds = 10
/// refine = true
/// refinement_prompt = "analyze_tool_result"
/// calculation_hint = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum model calls in the main loop of one turn
    pub max_rounds: usize,
    /// Refine the final result through the prompt service
    pub refine: bool,
    /// Prompt used for refinement
    pub refinement_prompt: String,
    /// Remind the model to use the calculator on arithmetic-looking input
    pub calculation_hint: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_rounds: params.max_rounds,
            refine: params.refine,
            refinement_prompt: params.refinement_prompt,
            calculation_hint: params.calculation_hint,
        }
    }
}

impl FileAgentConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_rounds(self.max_rounds)
            .with_refine(self.refine)
            .with_refinement_prompt(self.refinement_prompt.clone())
            .with_calculation_hint(self.calculation_hint)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.max_rounds == 0 {
            return vec![ConfigIssue::error(
                ConfigIssueCode::ZeroMaxRounds,
                "agent.max_rounds must be at least 1",
            )];
        }
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_execution_params() {
        let config = FileAgentConfig {
            max_rounds: 4,
            refine: false,
            refinement_prompt: "tool_result".to_string(),
            calculation_hint: false,
        };
        let params = config.to_execution_params();
        assert_eq!(params.max_rounds, 4);
        assert!(!params.refine);
        assert_eq!(params.refinement_prompt, "tool_result");
        assert!(!params.calculation_hint);
    }

    #[test]
    fn test_zero_rounds_is_an_error() {
        let config = FileAgentConfig {
            max_rounds: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }
}
