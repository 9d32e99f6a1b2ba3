//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::chat::ReplCommand;
use crate::{ConsoleFormatter, ProgressReporter, ReplConfig};
use colored::Colorize;
use hostagent_application::{
    ConversationOrchestrator, NoProgress, PromptServicePort, TurnError, TurnOutput,
    TurnProgressNotifier,
};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::Path;
use std::sync::Arc;

/// Entries kept in the line-editor history
const HISTORY_CAPACITY: usize = 1000;

/// Interactive chat REPL
pub struct ChatRepl {
    orchestrator: ConversationOrchestrator,
    prompts: Arc<dyn PromptServicePort>,
    config: ReplConfig,
    verbose: bool,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(orchestrator: ConversationOrchestrator, prompts: Arc<dyn PromptServicePort>) -> Self {
        Self {
            orchestrator,
            prompts,
            config: ReplConfig::default(),
            verbose: false,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Echo model replies on the progress lines
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn orchestrator(&self) -> &ConversationOrchestrator {
        &self.orchestrator
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.config.history_path() else {
            return editor;
        };

        match Self::file_history(&path) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Warning: history disabled ({}): {}", path.display(), e).yellow()
                );
                editor
            }
        }
    }

    /// Open the history file, creating its directory first
    fn file_history(path: &Path) -> Result<FileBackedHistory, String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        FileBackedHistory::with_file(HISTORY_CAPACITY, path.to_path_buf()).map_err(|e| e.to_string())
    }

    /// Run the interactive REPL until `exit` or Ctrl-D
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("hostagent".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if self.handle_line(&line).await {
                        println!("Bye!");
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Answer a single question, print the result and return.
    pub async fn ask_once(&mut self, question: &str) -> Result<(), TurnError> {
        let output = self.run_turn(question).await?;
        println!("{}", ConsoleFormatter::answer(&output));
        Ok(())
    }

    fn print_welcome(&self) {
        let gateway = self.orchestrator.gateway();
        println!();
        println!(
            "{}",
            ConsoleFormatter::welcome(
                &gateway.providers(),
                &gateway.current_provider(),
                self.orchestrator.tool_executor().tool_spec(),
            )
        );
    }

    /// Handle one line of input. Returns true if the REPL should exit.
    pub async fn handle_line(&mut self, line: &str) -> bool {
        match ReplCommand::parse(line) {
            ReplCommand::Empty => {}
            ReplCommand::Exit => return true,
            ReplCommand::Help => println!("{}", ConsoleFormatter::help()),
            ReplCommand::Tools => println!(
                "{}",
                ConsoleFormatter::tools(self.orchestrator.tool_executor().tool_spec())
            ),
            ReplCommand::Prompts => {
                println!("{}", ConsoleFormatter::prompts(&self.prompts.list_prompts()))
            }
            ReplCommand::Providers => {
                let gateway = self.orchestrator.gateway();
                println!(
                    "{}",
                    ConsoleFormatter::providers(&gateway.providers(), &gateway.current_provider())
                );
            }
            ReplCommand::Use(n) => self.switch_provider(n),
            ReplCommand::Clear => {
                self.orchestrator.clear_history();
                println!("{}", "Conversation cleared.".dimmed());
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type help for available commands");
            }
            ReplCommand::Turn(question) => self.process_question(question).await,
        }
        false
    }

    fn switch_provider(&self, number: usize) {
        let gateway = self.orchestrator.gateway();
        let switched = number
            .checked_sub(1)
            .is_some_and(|index| gateway.switch_to(index));

        if switched {
            println!("Now using provider: {}", gateway.current_provider().green());
        } else {
            eprintln!(
                "{}",
                ConsoleFormatter::error(&format!(
                    "no provider number {} (choose 1-{})",
                    number,
                    gateway.providers().len()
                ))
            );
        }
    }

    async fn run_turn(&mut self, question: &str) -> Result<TurnOutput, TurnError> {
        let reporter;
        let progress: &dyn TurnProgressNotifier = if self.config.show_progress {
            reporter = ProgressReporter::new().with_verbose(self.verbose);
            &reporter
        } else {
            &NoProgress
        };
        self.orchestrator.handle_user_input(question, progress).await
    }

    async fn process_question(&mut self, question: &str) {
        println!();
        match self.run_turn(question).await {
            Ok(output) => println!("{}", ConsoleFormatter::answer(&output)),
            Err(e) => eprintln!("{}", ConsoleFormatter::error(&e.to_string())),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hostagent_application::{
        ExecutionParams, GatewayError, LlmGateway, PromptArguments, PromptError, PromptInfo,
        RenderedPrompt, ToolExecutorPort,
    };
    use hostagent_domain::{Message, ToolCall, ToolResult, ToolSpec};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TwoProviderGateway {
        current: AtomicUsize,
        replies: Mutex<VecDeque<String>>,
    }

    #[async_trait]
    impl LlmGateway for TwoProviderGateway {
        async fn chat(&self, _messages: &[Message]) -> Result<String, GatewayError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GatewayError::Connection("no more replies".to_string()))
        }

        fn extract_assistant_message(&self, raw: &str) -> String {
            raw.to_string()
        }

        fn current_provider(&self) -> String {
            self.providers()[self.current.load(Ordering::SeqCst)].clone()
        }

        fn providers(&self) -> Vec<String> {
            vec!["deepseek".to_string(), "azure".to_string()]
        }

        fn switch_to(&self, index: usize) -> bool {
            if index >= 2 {
                return false;
            }
            self.current.store(index, Ordering::SeqCst);
            true
        }
    }

    struct NoTools(ToolSpec);

    #[async_trait]
    impl ToolExecutorPort for NoTools {
        fn tool_spec(&self) -> &ToolSpec {
            &self.0
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            ToolResult::success(&call.tool_name, "unused")
        }
    }

    struct NoPrompts;

    #[async_trait]
    impl PromptServicePort for NoPrompts {
        fn list_prompts(&self) -> Vec<PromptInfo> {
            vec![]
        }

        async fn get_prompt(
            &self,
            name: &str,
            _arguments: &PromptArguments,
        ) -> Result<RenderedPrompt, PromptError> {
            Err(PromptError::NotFound(name.to_string()))
        }
    }

    fn repl(replies: &[&str]) -> ChatRepl {
        let gateway = Arc::new(TwoProviderGateway {
            current: AtomicUsize::new(0),
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        });
        let prompts: Arc<dyn PromptServicePort> = Arc::new(NoPrompts);
        let orchestrator = ConversationOrchestrator::new(
            gateway,
            Arc::new(NoTools(ToolSpec::new())),
            prompts.clone(),
            ExecutionParams::default().with_refine(false),
        );
        ChatRepl::new(orchestrator, prompts).with_config(ReplConfig {
            show_progress: false,
            save_history: false,
            history_file: None,
        })
    }

    #[test]
    fn test_history_directory_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // a regular file where the history directory should be
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        assert!(ChatRepl::file_history(&blocker.join("history.txt")).is_err());
    }

    #[test]
    fn test_history_file_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.txt");

        assert!(ChatRepl::file_history(&path).is_ok());
        assert!(dir.path().join("nested").is_dir());
    }

    #[tokio::test]
    async fn test_turn_and_clear() {
        let mut repl = repl(&["Hello there"]);

        assert!(!repl.handle_line("hi").await);
        let history = repl.orchestrator().history().messages();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].content, "Hello there");

        assert!(!repl.handle_line("/clear").await);
        assert_eq!(repl.orchestrator().history().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_session_alive() {
        let mut repl = repl(&[]);
        assert!(!repl.handle_line("hi").await);
        assert!(repl.handle_line("exit").await);
    }

    #[tokio::test]
    async fn test_use_switches_provider_by_number() {
        let mut repl = repl(&[]);

        assert!(!repl.handle_line("use 2").await);
        assert_eq!(repl.orchestrator().gateway().current_provider(), "azure");

        assert!(!repl.handle_line("use 3").await);
        assert!(!repl.handle_line("use 0").await);
        assert_eq!(repl.orchestrator().gateway().current_provider(), "azure");
    }
}
