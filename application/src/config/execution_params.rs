//! Execution parameters for the turn loop.
//!
//! [`ExecutionParams`] groups the static parameters that control the loop in
//! [`ConversationOrchestrator`](crate::use_cases::conversation::ConversationOrchestrator).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Name of the prompt used to refine the final answer by default
pub const DEFAULT_REFINEMENT_PROMPT: &str = "analyze_tool_result";

/// Turn loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum number of model calls in the main loop of a single turn.
    pub max_rounds: usize,
    /// Whether the final result goes through the refinement prompt.
    pub refine: bool,
    /// Prompt rendered by the prompt service during refinement.
    pub refinement_prompt: String,
    /// Whether calculation-looking input gets a system reminder.
    pub calculation_hint: bool,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            refine: true,
            refinement_prompt: DEFAULT_REFINEMENT_PROMPT.to_string(),
            calculation_hint: true,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_refine(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }

    pub fn with_refinement_prompt(mut self, name: impl Into<String>) -> Self {
        self.refinement_prompt = name.into();
        self
    }

    pub fn with_calculation_hint(mut self, enabled: bool) -> Self {
        self.calculation_hint = enabled;
        self
    }
}
