//! Use cases (application services)
//!
//! - [`tool_invocation`]: execute tool-call markup found in assistant text
//! - [`refine_result`]: rewrite a final result through the prompt service
//! - [`conversation`]: the bounded per-turn loop over both

pub mod conversation;
pub mod refine_result;
pub mod tool_invocation;
