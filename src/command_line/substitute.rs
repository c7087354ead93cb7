//! `:s` substitute
//!
//! Parses `s/pattern/replacement/flags` (any single-character delimiter
//! after `s`) and applies the substitution over a line range. Every
//! occurrence on a line is replaced; the `g` flag is accepted for
//! compatibility and `i` forces case-insensitive matching.

use regex::RegexBuilder;

use crate::buffer::TextBuffer;
use crate::error::StrandError;

/// Line scope of a substitute command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstituteRange {
    /// The cursor line only (`:s`)
    CurrentLine,
    /// Every line (`:%s`)
    AllLines,
}

/// A parsed substitute command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitute {
    pub range: SubstituteRange,
    pub pattern: String,
    pub replacement: String,
    pub ignore_case: bool,
}

/// Split `s/pat/rep/flags` on its delimiter, honoring backslash escapes
///
/// `body` is the text after the command name (starting with the
/// delimiter). Returns `None` for a malformed command.
#[must_use]
pub fn parse(range: SubstituteRange, body: &str) -> Option<Substitute> {
    let mut chars = body.chars();
    let delimiter = chars.next()?;
    if delimiter.is_alphanumeric() || delimiter == '\\' {
        return None;
    }

    let mut parts: Vec<String> = vec![String::new()];
    let mut escaped = false;
    for c in chars {
        if escaped {
            if c != delimiter {
                parts.last_mut().expect("non-empty").push('\\');
            }
            parts.last_mut().expect("non-empty").push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == delimiter && parts.len() < 3 {
            parts.push(String::new());
        } else {
            parts.last_mut().expect("non-empty").push(c);
        }
    }

    if parts.len() < 2 || parts[0].is_empty() {
        return None;
    }

    let pattern = parts[0].clone();
    let replacement = parts[1].clone();
    let flags = parts.get(2).map(String::as_str).unwrap_or("");
    Some(Substitute {
        range,
        pattern,
        replacement,
        ignore_case: flags.contains('i'),
    })
}

/// Outcome of a substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstituteReport {
    /// Total replacements made
    pub count: usize,
    /// Lines that changed
    pub lines: usize,
}

/// Apply a substitution to the buffer. Replaces every occurrence on each
/// line in range; a pattern with no matches reports zero without touching
/// the buffer.
pub fn apply(
    buffer: &mut TextBuffer,
    command: &Substitute,
    ignorecase_option: bool,
) -> Result<SubstituteReport, StrandError> {
    let re = RegexBuilder::new(&command.pattern)
        .case_insensitive(command.ignore_case || ignorecase_option)
        .build()
        .map_err(|_| {
            StrandError::user_input(
                "BAD_PATTERN",
                format!("Invalid pattern: {}", command.pattern),
            )
        })?;

    let rows: Vec<usize> = match command.range {
        SubstituteRange::CurrentLine => vec![buffer.cursor().row],
        SubstituteRange::AllLines => (0..buffer.line_count()).collect(),
    };

    let mut report = SubstituteReport { count: 0, lines: 0 };
    let mut changes: Vec<(usize, String)> = Vec::new();
    for row in rows {
        let line = buffer.line(row).unwrap_or("");
        let hits = re.find_iter(line).count();
        if hits == 0 {
            continue;
        }
        let replaced = re.replace_all(line, command.replacement.as_str());
        changes.push((row, replaced.into_owned()));
        report.count += hits;
        report.lines += 1;
    }

    if changes.is_empty() {
        return Err(StrandError::user_input(
            "PATTERN_NOT_FOUND",
            format!("Pattern not found: {}", command.pattern),
        ));
    }

    buffer.begin_undo_group();
    for (row, text) in changes {
        buffer.replace_line(row, text);
    }
    buffer.end_undo_group();
    Ok(report)
}
