//! Command executor
//! Executes parsed commands against the session and reports a structured
//! result the host applies

use crate::session::EditorSession;
use crate::split::SplitOrientation;

use super::parser::{parse, ParsedCommand};
use super::settings::create_settings_registry;
use super::substitute;

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Command executed successfully
    Success,
    /// The editor should exit
    Quit,
    /// Error surfaced as a status message
    Error(String),
}

/// Parse and execute one command line, updating the session status and
/// quit flag
pub fn execute_line(session: &mut EditorSession, line: &str) -> ExecutionResult {
    let result = execute(session, parse(line));
    match &result {
        ExecutionResult::Quit => session.request_quit(),
        ExecutionResult::Error(message) => session.set_status(message),
        ExecutionResult::Success => {}
    }
    result
}

/// Execute a parsed command
pub fn execute(session: &mut EditorSession, command: ParsedCommand) -> ExecutionResult {
    match command {
        ParsedCommand::Write { path } => match session.write_active_buffer(path.as_deref()) {
            Ok(message) => {
                session.set_status(&message);
                ExecutionResult::Success
            }
            Err(err) => ExecutionResult::Error(err.message),
        },

        ParsedCommand::Quit { force } => quit_one(session, force),

        ParsedCommand::WriteQuit { path } => {
            match session.write_active_buffer(path.as_deref()) {
                Ok(_) => quit_one(session, true),
                Err(err) => ExecutionResult::Error(err.message),
            }
        }

        ParsedCommand::Edit { path, force } => {
            let result = match path {
                Some(path) => session.open_file(&path),
                None => session.reload_active_buffer(force),
            };
            match result {
                Ok(message) => {
                    session.set_status(&message);
                    ExecutionResult::Success
                }
                Err(err) => ExecutionResult::Error(err.message),
            }
        }

        ParsedCommand::BufferNext => {
            session.cycle_buffer(true);
            ExecutionResult::Success
        }
        ParsedCommand::BufferPrev => {
            session.cycle_buffer(false);
            ExecutionResult::Success
        }

        ParsedCommand::Split => {
            session.split_window(SplitOrientation::Horizontal);
            ExecutionResult::Success
        }
        ParsedCommand::VSplit => {
            session.split_window(SplitOrientation::Vertical);
            ExecutionResult::Success
        }
        ParsedCommand::Close => {
            if session.close_active_window() {
                ExecutionResult::Success
            } else {
                ExecutionResult::Error("Cannot close last window".to_string())
            }
        }

        ParsedCommand::TabNew => {
            session.new_tab();
            ExecutionResult::Success
        }
        ParsedCommand::TabNext => {
            session.tabs.next_tab();
            ExecutionResult::Success
        }
        ParsedCommand::TabPrev => {
            session.tabs.prev_tab();
            ExecutionResult::Success
        }

        ParsedCommand::Set { option, value } => {
            let registry = create_settings_registry();
            match registry.execute(&mut session.options, &option, value.as_deref()) {
                Ok(()) => ExecutionResult::Success,
                Err(err) => ExecutionResult::Error(err.to_string()),
            }
        }
        ParsedCommand::SetShow { option } => {
            let registry = create_settings_registry();
            match registry.show(&session.options, &option) {
                Ok(rendered) => {
                    session.set_status(&rendered);
                    ExecutionResult::Success
                }
                Err(err) => ExecutionResult::Error(err.to_string()),
            }
        }

        ParsedCommand::Substitute(sub) => {
            let ignorecase = session.options.ignorecase;
            match substitute::apply(session.active_buffer_mut(), &sub, ignorecase) {
                Ok(report) => {
                    session.clamp_cursor_column();
                    let lines = if report.lines == 1 { "line" } else { "lines" };
                    session.set_status(&format!(
                        "{} substitutions on {} {lines}",
                        report.count, report.lines
                    ));
                    ExecutionResult::Success
                }
                Err(err) => ExecutionResult::Error(err.message),
            }
        }

        ParsedCommand::Undo => {
            if session.active_buffer_mut().undo() {
                ExecutionResult::Success
            } else {
                ExecutionResult::Error("Already at oldest change".to_string())
            }
        }
        ParsedCommand::Redo => {
            if session.active_buffer_mut().redo() {
                ExecutionResult::Success
            } else {
                ExecutionResult::Error("Already at newest change".to_string())
            }
        }

        ParsedCommand::NoHighlight => {
            session.clear_search_highlight();
            ExecutionResult::Success
        }

        ParsedCommand::Registers => {
            let listing = session.registers.listing();
            if listing.is_empty() {
                session.set_status("No registers");
            } else {
                let rendered: Vec<String> = listing
                    .iter()
                    .map(|(name, text)| {
                        format!("\"{name} {}", text.replace('\n', "^J"))
                    })
                    .collect();
                session.set_status(&rendered.join("  "));
            }
            ExecutionResult::Success
        }

        ParsedCommand::Unknown { name } => {
            ExecutionResult::Error(format!("Not an editor command: {name}"))
        }
        ParsedCommand::Ambiguous { prefix, matches } => ExecutionResult::Error(format!(
            "Ambiguous command '{prefix}': matches {}",
            matches.join(", ")
        )),
    }
}

/// `:q` closes the active window, then the active tab, and only quits the
/// editor from the last window of the last tab.
fn quit_one(session: &mut EditorSession, force: bool) -> ExecutionResult {
    if session.tabs.active().windows().len() > 1 {
        session.close_active_window();
        return ExecutionResult::Success;
    }
    if session.tabs.len() > 1 {
        session.tabs.close_active();
        return ExecutionResult::Success;
    }
    if session.active_buffer().modified && !force {
        return ExecutionResult::Error(
            "No write since last change (add ! to override)".to_string(),
        );
    }
    ExecutionResult::Quit
}
