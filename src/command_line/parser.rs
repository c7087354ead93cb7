//! Command parser
//! Parses ex command-line input into structured command data

use super::registry::{NameMatch, NameRegistry};
use super::substitute::{self, Substitute, SubstituteRange};

/// Parsed command representation
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommand {
    /// Write the active buffer, optionally to a new path
    Write { path: Option<String> },
    /// Quit the active window (the editor from the last one)
    Quit { force: bool },
    /// Write then quit
    WriteQuit { path: Option<String> },
    /// Open a file, or reload with no path
    Edit { path: Option<String>, force: bool },
    /// Cycle the buffer shown in the active window
    BufferNext,
    BufferPrev,
    /// Window management
    Split,
    VSplit,
    Close,
    /// Tab management
    TabNew,
    TabNext,
    TabPrev,
    /// Set an option
    Set {
        option: String,
        value: Option<String>,
    },
    /// Query an option (`:set option?`)
    SetShow { option: String },
    /// Substitute over a range
    Substitute(Substitute),
    /// History
    Undo,
    Redo,
    /// Clear search highlighting
    NoHighlight,
    /// List the registers
    Registers,
    /// Unknown command name
    Unknown { name: String },
    /// Ambiguous prefix
    Ambiguous {
        prefix: String,
        matches: Vec<String>,
    },
}

/// The fixed colon-command table
#[must_use]
pub fn command_registry() -> NameRegistry {
    NameRegistry::new()
        .register("write", &["w"])
        .register("quit", &["q"])
        .register("wq", &["x"])
        .register("edit", &["e"])
        .register("bnext", &["bn"])
        .register("bprevious", &["bp"])
        .register("split", &["sp"])
        .register("vsplit", &["vs"])
        .register("close", &["clo"])
        .register("tabnew", &[])
        .register("tabnext", &["tabn"])
        .register("tabprevious", &["tabp"])
        .register("set", &["se"])
        .register("undo", &["u"])
        .register("redo", &["red"])
        .register("nohlsearch", &["noh"])
        .register("registers", &["reg"])
}

/// Parse a command line (without the leading `:`)
#[must_use]
pub fn parse(input: &str) -> ParsedCommand {
    let input = input.trim();
    let input = input.strip_prefix(':').unwrap_or(input).trim_start();

    if input.is_empty() {
        return ParsedCommand::Unknown {
            name: String::new(),
        };
    }

    // Substitute carries its own micro-syntax and is detected before
    // registry matching: `s/.../.../` and `%s/.../.../`
    if let Some(cmd) = parse_substitute_form(input) {
        return cmd;
    }

    let (word, rest) = split_command_word(input);
    let (name, force) = match word.strip_suffix('!') {
        Some(stripped) => (stripped, true),
        None => (word, false),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match command_registry().resolve(name) {
        NameMatch::Exact(canonical) | NameMatch::Prefix(canonical) => {
            build_command(&canonical, force, &args)
        }
        NameMatch::Ambiguous { prefix, matches } => ParsedCommand::Ambiguous { prefix, matches },
        NameMatch::Unknown(name) => ParsedCommand::Unknown { name },
    }
}

fn parse_substitute_form(input: &str) -> Option<ParsedCommand> {
    let (range, body) = if let Some(rest) = input.strip_prefix("%s") {
        (SubstituteRange::AllLines, rest)
    } else if let Some(rest) = input.strip_prefix('s') {
        (SubstituteRange::CurrentLine, rest)
    } else {
        return None;
    };

    // Only the delimiter form is a substitute; `:set`, `:sp`, ... fall
    // through to the registry
    let delimiter = body.chars().next()?;
    if delimiter.is_alphanumeric() || delimiter.is_whitespace() || delimiter == '!' {
        return None;
    }

    match substitute::parse(range, body) {
        Some(sub) => Some(ParsedCommand::Substitute(sub)),
        None => Some(ParsedCommand::Unknown {
            name: input.to_string(),
        }),
    }
}

/// Split off the command word (the leading run of letters plus an
/// optional bang)
fn split_command_word(input: &str) -> (&str, &str) {
    let mut end = input
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map_or(input.len(), |(i, _)| i);
    if input[end..].starts_with('!') {
        end += 1;
    }
    (&input[..end], &input[end..])
}

fn build_command(canonical: &str, force: bool, args: &[&str]) -> ParsedCommand {
    match canonical {
        "write" => match args {
            [] => ParsedCommand::Write { path: None },
            [path] => ParsedCommand::Write {
                path: Some((*path).to_string()),
            },
            _ => too_many_args("write"),
        },
        "quit" => ParsedCommand::Quit { force },
        "wq" => match args {
            [] => ParsedCommand::WriteQuit { path: None },
            [path] => ParsedCommand::WriteQuit {
                path: Some((*path).to_string()),
            },
            _ => too_many_args("wq"),
        },
        "edit" => match args {
            [] => ParsedCommand::Edit { path: None, force },
            [path] => ParsedCommand::Edit {
                path: Some((*path).to_string()),
                force,
            },
            _ => too_many_args("edit"),
        },
        "bnext" => ParsedCommand::BufferNext,
        "bprevious" => ParsedCommand::BufferPrev,
        "split" => ParsedCommand::Split,
        "vsplit" => ParsedCommand::VSplit,
        "close" => ParsedCommand::Close,
        "tabnew" => ParsedCommand::TabNew,
        "tabnext" => ParsedCommand::TabNext,
        "tabprevious" => ParsedCommand::TabPrev,
        "set" => parse_set_args(args),
        "undo" => ParsedCommand::Undo,
        "redo" => ParsedCommand::Redo,
        "nohlsearch" => ParsedCommand::NoHighlight,
        "registers" => ParsedCommand::Registers,
        other => ParsedCommand::Unknown {
            name: other.to_string(),
        },
    }
}

fn too_many_args(name: &str) -> ParsedCommand {
    ParsedCommand::Unknown {
        name: format!("{name} (too many arguments)"),
    }
}

/// Parse `:set` arguments
///
/// Supported forms: `set option`, `set nooption`, `set invoption`,
/// `set option=value`, `set option value`, `set option?`
fn parse_set_args(args: &[&str]) -> ParsedCommand {
    let Some(first) = args.first() else {
        return ParsedCommand::Unknown {
            name: "set (missing option)".to_string(),
        };
    };

    if let Some(option) = first.strip_suffix('?') {
        return ParsedCommand::SetShow {
            option: option.to_string(),
        };
    }

    if let Some((option, value)) = first.split_once('=') {
        return ParsedCommand::Set {
            option: option.to_string(),
            value: Some(value.to_string()),
        };
    }

    match args.len() {
        1 => ParsedCommand::Set {
            option: (*first).to_string(),
            value: None,
        },
        2 => ParsedCommand::Set {
            option: (*first).to_string(),
            value: Some(args[1].to_string()),
        },
        _ => too_many_args("set"),
    }
}
