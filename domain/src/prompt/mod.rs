//! Prompt domain
//!
//! Templates for the system prompt, the calculation reminder, the judgment
//! question and the refinement prompts.

mod template;

pub use template::{PromptLanguage, PromptTemplate, ResultType, TIMEOUT_RESULT, UNPARSABLE_RESPONSE};
