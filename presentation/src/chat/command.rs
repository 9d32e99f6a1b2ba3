//! REPL input classification

/// What a line typed at the REPL prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    /// Blank line
    Empty,
    Exit,
    Help,
    Tools,
    Prompts,
    Providers,
    Clear,
    /// Switch provider; the number is 1-based as shown by `providers`
    Use(usize),
    /// A `/`-prefixed line that is not a command
    Unknown(&'a str),
    /// Anything else goes to the model
    Turn(&'a str),
}

impl<'a> ReplCommand<'a> {
    /// Classify a line of input.
    ///
    /// Commands are single words (plus the number for `use`) and may be
    /// prefixed with `/`. Without the prefix, a line that merely starts with
    /// a command word, such as "use the calculator", is a normal request.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (slashed, body) = match line.strip_prefix('/') {
            Some(rest) => (true, rest.trim()),
            None => (false, line),
        };

        let mut words = body.split_whitespace();
        let word = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match (word.as_str(), rest.as_slice()) {
            ("exit" | "quit" | "q", []) => Some(Self::Exit),
            ("help" | "h" | "?", []) => Some(Self::Help),
            ("tools", []) => Some(Self::Tools),
            ("prompts", []) => Some(Self::Prompts),
            ("providers", []) => Some(Self::Providers),
            ("clear", []) => Some(Self::Clear),
            ("use", [n]) => n.parse().ok().map(Self::Use),
            _ => None,
        };

        match command {
            Some(command) => command,
            None if slashed => Self::Unknown(line),
            None => Self::Turn(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_with_and_without_slash() {
        assert_eq!(ReplCommand::parse("exit"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("  /q  "), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("HELP"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("tools"), ReplCommand::Tools);
        assert_eq!(ReplCommand::parse("/prompts"), ReplCommand::Prompts);
        assert_eq!(ReplCommand::parse("providers"), ReplCommand::Providers);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
    }

    #[test]
    fn test_use_takes_a_number() {
        assert_eq!(ReplCommand::parse("use 2"), ReplCommand::Use(2));
        assert_eq!(ReplCommand::parse("/use 1"), ReplCommand::Use(1));
        assert_eq!(ReplCommand::parse("/use azure"), ReplCommand::Unknown("/use azure"));
        assert_eq!(ReplCommand::parse("/use"), ReplCommand::Unknown("/use"));
    }

    #[test]
    fn test_requests_starting_with_command_words() {
        assert_eq!(
            ReplCommand::parse("use the calculator to add 2 and 3"),
            ReplCommand::Turn("use the calculator to add 2 and 3")
        );
        assert_eq!(
            ReplCommand::parse("clear the memory key 'city'"),
            ReplCommand::Turn("clear the memory key 'city'")
        );
        assert_eq!(ReplCommand::parse("  compute 6 * 7 "), ReplCommand::Turn("compute 6 * 7"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(ReplCommand::parse(""), ReplCommand::Empty);
        assert_eq!(ReplCommand::parse("   \t"), ReplCommand::Empty);
        assert_eq!(ReplCommand::parse("/models"), ReplCommand::Unknown("/models"));
        assert_eq!(ReplCommand::parse("/"), ReplCommand::Unknown("/"));
    }
}
