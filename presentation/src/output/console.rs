//! Console output formatter for turns, catalogues and REPL messages

use colored::Colorize;
use hostagent_application::{PromptInfo, TurnOutput};
use hostagent_domain::ToolSpec;

/// Formats turn results and REPL listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner shown when the interactive chat starts
    pub fn welcome(providers: &[String], current: &str, tools: &ToolSpec) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("hostagent"));
        output.push('\n');
        output.push_str(&format!(
            "{} {} (failover order: {})\n",
            "Provider:".cyan().bold(),
            current,
            providers.join(" -> ")
        ));
        let names: Vec<&str> = tools.names().collect();
        output.push_str(&format!(
            "{} {}\n",
            "Tools:".cyan().bold(),
            if names.is_empty() {
                "(none)".to_string()
            } else {
                names.join(", ")
            }
        ));
        output.push_str(&format!(
            "\n{}\n",
            "Type a request, 'help' for commands, 'exit' to quit.".dimmed()
        ));

        output
    }

    /// REPL command reference
    pub fn help() -> String {
        let commands = [
            ("help", "Show this help"),
            ("tools", "List available tools and their parameters"),
            ("prompts", "List prompts offered by the prompt service"),
            ("providers", "List providers and mark the current one"),
            ("use <n>", "Switch to provider number n"),
            ("clear", "Start a fresh conversation"),
            ("exit", "Quit (also: quit, Ctrl-D)"),
        ];

        let mut output = format!("{}\n", "Commands:".cyan().bold());
        for (command, description) in commands {
            output.push_str(&format!("  {:<12} {}\n", command.bold(), description));
        }
        output.push_str(&format!(
            "{}\n",
            "Commands may be prefixed with '/'. Anything else is sent to the model.".dimmed()
        ));
        output
    }

    /// Format the answer of a finished turn
    pub fn answer(output: &TurnOutput) -> String {
        let mut details = vec![format!(
            "{} round{}",
            output.rounds,
            if output.rounds == 1 { "" } else { "s" }
        )];
        if output.refined {
            details.push("refined".to_string());
        }
        if output.timed_out {
            details.push("round limit reached".to_string());
        }

        format!(
            "\n{}\n{}\n{}\n",
            "[LLM]".green().bold(),
            output.answer,
            format!("({})", details.join(", ")).dimmed()
        )
    }

    /// Format the tool catalogue
    pub fn tools(spec: &ToolSpec) -> String {
        if spec.is_empty() {
            return format!("{}\n", "No tools are enabled.".yellow());
        }

        let mut output = format!("{}\n", "Available tools:".cyan().bold());
        for tool in spec.all() {
            output.push_str(&format!("\n  {} - {}\n", tool.name.bold(), tool.description));
            for param in &tool.parameters {
                let mut line = format!(
                    "    {} ({}{})",
                    param.name,
                    param.param_type,
                    if param.required { ", required" } else { "" }
                );
                if !param.description.is_empty() {
                    line.push_str(&format!(": {}", param.description));
                }
                if !param.allowed_values.is_empty() {
                    line.push_str(&format!(" [{}]", param.allowed_values.join(", ")));
                }
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    }

    /// Format the prompt catalogue
    pub fn prompts(prompts: &[PromptInfo]) -> String {
        if prompts.is_empty() {
            return format!("{}\n", "No prompts available.".yellow());
        }

        let mut output = format!("{}\n", "Available prompts:".cyan().bold());
        for prompt in prompts {
            output.push_str(&format!("\n  {} - {}\n", prompt.name.bold(), prompt.description));
            for arg in &prompt.arguments {
                output.push_str(&format!(
                    "    {}{}: {}\n",
                    arg.name,
                    if arg.required { " (required)" } else { "" },
                    arg.description
                ));
            }
        }
        output
    }

    /// Format the provider list, numbered from 1, with the current one marked
    pub fn providers(providers: &[String], current: &str) -> String {
        let mut output = format!("{}\n", "Providers (failover order):".cyan().bold());
        for (i, name) in providers.iter().enumerate() {
            if name == current {
                output.push_str(&format!("  {} {}. {}\n", "*".green().bold(), i + 1, name.green()));
            } else {
                output.push_str(&format!("    {}. {}\n", i + 1, name));
            }
        }
        output
    }

    /// Format an error line
    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}
