//! Configuration file loading for hostagent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `HOSTAGENT_*` environment variables (`__` separates nested keys)
//! 3. Project root: `./hostagent.toml` or `./.hostagent.toml`
//! 4. Global: `$XDG_CONFIG_HOME/hostagent/config.toml`
//! 5. Default values

mod file_config;
mod loader;
pub mod validation;

pub use file_config::{
    AZURE_MAX_TOKENS_LIMIT, FileAgentConfig, FileAzureConfig, FileConfig, FileDeepSeekConfig,
    FileLoggingConfig, FileProvidersConfig, FileReplConfig, FileToolsConfig,
};
pub use loader::ConfigLoader;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity, mask_secret};
