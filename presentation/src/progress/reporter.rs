//! Progress reporting for conversation turns

use colored::Colorize;
use hostagent_application::TurnProgressNotifier;
use hostagent_domain::{DomainError, ToolCall, ToolResult, util::preview};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Longest model reply or tool output echoed on a progress line
const PREVIEW_CHARS: usize = 120;

/// Reports turn progress on the console: a spinner while the model is
/// working and one line per tool call, judgment and fallback.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: false,
        }
    }

    /// Also echo model replies
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = spinner.replace(pb) {
            old.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
    }

    /// Print a line without tearing an active spinner
    fn line(&self, text: String) {
        let spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        match spinner.as_ref() {
            Some(pb) => pb.println(text),
            None => println!("{}", text),
        }
    }

    fn system(&self, text: &str) {
        self.line(format!("{} {}", "[system]".cyan(), text));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_calculation_hint(&self) {
        self.system("calculation detected, reminding the model to use the calculator tool");
    }

    fn on_round_start(&self, round: usize, max_rounds: usize) {
        if round > 1 {
            self.system(&format!("round {}/{}", round, max_rounds).dimmed().to_string());
        }
    }

    fn on_model_call_start(&self, provider: &str) {
        self.start_spinner(format!("Waiting for {}...", provider));
    }

    fn on_model_call_end(&self) {
        self.stop_spinner();
    }

    fn on_model_reply(&self, text: &str) {
        if self.verbose {
            self.line(format!(
                "{} {}",
                "[LLM]".green(),
                preview(text, PREVIEW_CHARS).dimmed()
            ));
        }
    }

    fn on_tool_call(&self, call: &ToolCall) {
        self.line(format!(
            "{} {} {}",
            "[tool]".yellow(),
            call.tool_name.bold(),
            call.arguments_json().dimmed()
        ));
    }

    fn on_tool_result(&self, result: &ToolResult) {
        let text = preview(&result.text(), PREVIEW_CHARS);
        if result.is_success() {
            self.line(format!("{} {} {}", "[tool]".yellow(), "✓".green(), text));
        } else {
            self.line(format!("{} {} {}", "[tool]".yellow(), "✗".red(), text.red()));
        }
    }

    fn on_tool_call_rejected(&self, error: &DomainError) {
        self.line(format!(
            "{} {} {}",
            "[tool]".yellow(),
            "rejected:".red(),
            error
        ));
    }

    fn on_judgment(&self, _text: &str, continues: bool) {
        if continues {
            self.system("model requested more tool calls");
        }
    }

    fn on_round_limit(&self, max_rounds: usize) {
        self.stop_spinner();
        self.line(format!(
            "{} {}",
            "[system]".cyan(),
            format!("no final answer after {} rounds", max_rounds).yellow()
        ));
    }

    fn on_refinement_start(&self) {
        self.system("refining the answer");
    }

    fn on_refinement_fallback(&self, reason: &str) {
        self.stop_spinner();
        self.line(format!(
            "{} {}",
            "[system]".cyan(),
            format!("refinement failed ({}), showing the raw result", reason).yellow()
        ));
    }
}
