//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for hostagent
#[derive(Parser, Debug)]
#[command(name = "hostagent")]
#[command(author, version, about = "Tool-calling chat agent with provider failover")]
#[command(long_about = r#"
hostagent answers requests with a language model that can call local tools
(calculator, greeting, weather, memory). Tool calls written by the model are executed,
their results are spliced back into the reply, and the model keeps going
until it gives a final answer. When a provider fails, the next configured
provider takes over.

Configuration is loaded from (in priority order):
1. --config <path>                  Explicit config file
2. HOSTAGENT_<SECTION>__<KEY>       Environment variables
3. ./hostagent.toml                 Project-level config
4. ~/.config/hostagent/config.toml  Global config

Example:
  hostagent "compute 6 * 7"
  hostagent --provider azure
  hostagent -vv --conversation-log turns.jsonl
"#)]
pub struct Cli {
    /// Question to answer; starts the interactive chat when omitted
    pub question: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and effective settings, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Provider to start with (must be listed in providers.order)
    #[arg(short, long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append the turn transcript as JSONL to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Suppress progress indicators
    #[arg(short = 'q', long = "no-progress")]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shot_question() {
        let cli = Cli::try_parse_from(["hostagent", "compute 6 * 7"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("compute 6 * 7"));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_progress);
    }

    #[test]
    fn test_interactive_with_flags() {
        let cli = Cli::try_parse_from([
            "hostagent",
            "-vv",
            "--provider",
            "azure",
            "--config",
            "custom.toml",
            "--conversation-log",
            "turns.jsonl",
            "--no-progress",
        ])
        .unwrap();

        assert!(cli.question.is_none());
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.provider.as_deref(), Some("azure"));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.conversation_log, Some(PathBuf::from("turns.jsonl")));
        assert!(cli.no_progress);
    }

    #[test]
    fn test_config_switches() {
        let cli = Cli::try_parse_from(["hostagent", "--no-config", "--show-config", "-q"]).unwrap();
        assert!(cli.no_config);
        assert!(cli.show_config);
        assert!(cli.no_progress);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["hostagent", "--chat"]).is_err());
    }
}
