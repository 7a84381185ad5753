//! Line-oriented command parsing for the terminal front end.

pub const HELP: &[&str] = &[
    "Type or paste the article; every plain line is appended to it.",
    "  :check            check the article",
    "  :clear            clear article and result",
    "  :related <query>  look up related coverage",
    "  :show             print the article and current result",
    "  :help             show this help",
    "  :quit             exit",
    "Start a line with '::' to enter a literal ':'.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Append(String),
    Check,
    Clear,
    Related(String),
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> InputCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = line.strip_prefix("::") {
        return InputCommand::Append(format!(":{escaped}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return InputCommand::Append(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "check" | "c" => InputCommand::Check,
        "clear" => InputCommand::Clear,
        "related" | "r" if !arg.is_empty() => InputCommand::Related(arg.to_string()),
        "show" | "s" => InputCommand::Show,
        "help" | "h" | "?" => InputCommand::Help,
        "quit" | "q" => InputCommand::Quit,
        _ => InputCommand::Unknown(line.to_string()),
    }
}

/// Article text after appending one typed line.
pub fn append_line(article: &str, line: &str) -> String {
    if article.is_empty() {
        line.to_string()
    } else {
        format!("{article}\n{line}")
    }
}
