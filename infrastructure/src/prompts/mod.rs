//! In-process prompt service used for result refinement

mod local;

pub use local::{ANALYZE_TOOL_RESULT, LocalPromptService, TOOL_RESULT};
