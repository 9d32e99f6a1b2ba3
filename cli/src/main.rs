//! CLI entrypoint for hostagent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use hostagent_application::{ConversationOrchestrator, LlmGateway, PromptServicePort};
use hostagent_infrastructure::{
    ConfigLoader, FailoverGateway, FileConfig, JsonlConversationLogger, LocalPromptService,
    ProviderKind, ToolContext, ToolRegistry, build_providers,
};
use hostagent_presentation::{ChatRepl, Cli, ReplConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize diagnostics. `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))
}

/// Print warnings and fail on errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = Vec::new();
    for issue in issues {
        if issue.is_error() {
            errors.push(issue.message);
        } else {
            warn!("{}", issue.message);
            eprintln!("warning: {}", issue.message);
        }
    }
    if !errors.is_empty() {
        bail!("configuration errors:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

fn select_provider(gateway: &FailoverGateway, requested: &str) -> Result<()> {
    let name = ProviderKind::parse(requested)
        .map(|k| k.as_str().to_string())
        .unwrap_or_else(|| requested.trim().to_string());
    let providers = gateway.providers();
    match providers.iter().position(|p| *p == name) {
        Some(index) if gateway.switch_to(index) => Ok(()),
        _ => bail!(
            "provider '{}' is not configured (available: {})",
            requested,
            providers.join(", ")
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    info!("Starting hostagent");

    let config = load_config(&cli)?;

    if cli.show_config {
        if cli.no_config {
            println!("Configuration files disabled (--no-config); showing defaults");
        } else {
            ConfigLoader::print_config_sources(cli.config.as_ref());
        }
        println!();
        for line in config.summary() {
            println!("  {}", line);
        }
        return Ok(());
    }

    check_config(&config)?;

    // === Dependency Injection ===
    let gateway = Arc::new(FailoverGateway::new(build_providers(&config.providers)?)?);
    if let Some(requested) = &cli.provider {
        select_provider(&gateway, requested)?;
    }
    info!("Current provider: {}", gateway.current_provider());

    let tools = Arc::new(ToolRegistry::from_enabled(
        config.tools.enabled.as_slice(),
        &ToolContext::default(),
    ));
    let prompts: Arc<dyn PromptServicePort> = Arc::new(LocalPromptService::new());

    let mut orchestrator = ConversationOrchestrator::new(
        gateway,
        tools,
        prompts.clone(),
        config.agent.to_execution_params(),
    );

    let conversation_log = cli
        .conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log.as_ref().map(PathBuf::from));
    if let Some(path) = conversation_log {
        let logger = JsonlConversationLogger::open(&path)
            .with_context(|| format!("opening conversation log {}", path.display()))?;
        info!("Conversation log: {}", path.display());
        orchestrator = orchestrator.with_conversation_logger(Arc::new(logger));
    }

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.no_progress,
        save_history: config.repl.save_history,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    };
    let mut repl = ChatRepl::new(orchestrator, prompts)
        .with_config(repl_config)
        .with_verbose(cli.verbose > 0);

    match cli.question.as_deref() {
        Some(question) => repl.ask_once(question).await?,
        None => repl.run().await?,
    }

    Ok(())
}
