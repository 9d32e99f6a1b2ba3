//! Presentation-level configuration
//!
//! REPL behavior, filled in by the binary from the `[repl]` file section.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Persist line-editor history between sessions
    pub save_history: bool,
    /// History file; the platform data dir is used when unset
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            save_history: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// History file to use, if history is saved at all
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.save_history {
            return None;
        }
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("hostagent").join("history.txt")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_path() {
        let config = ReplConfig {
            history_file: Some(PathBuf::from("/tmp/h.txt")),
            ..Default::default()
        };
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/h.txt")));

        let config = ReplConfig {
            save_history: false,
            history_file: Some(PathBuf::from("/tmp/h.txt")),
            ..Default::default()
        };
        assert_eq!(config.history_path(), None);
    }
}
