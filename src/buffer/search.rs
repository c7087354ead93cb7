//! Buffer search
//!
//! Pattern matching over the line array with the `regex` crate. Literal
//! queries are escaped before compilation so the same scan path serves both.
//! An invalid pattern is reported as "no match", never as a panic or an
//! error the caller must unwrap.

use regex::{Regex, RegexBuilder};

use super::Position;

/// Where and how to start a search
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Starting position, inclusive for forward scans
    pub start: Position,
    /// Match case exactly
    pub case_sensitive: bool,
    /// Treat the pattern as a regular expression (otherwise literal)
    pub regex: bool,
    /// Scan toward the start of the buffer
    pub backwards: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            start: Position::new(0, 0),
            case_sensitive: true,
            regex: true,
            backwards: false,
        }
    }
}

/// A single match, end-exclusive in columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub start: Position,
    pub end: Position,
}

fn compile(pattern: &str, opts: &SearchOptions) -> Option<Regex> {
    let source = if opts.regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };
    RegexBuilder::new(&source)
        .case_insensitive(!opts.case_sensitive)
        .build()
        .ok()
}

/// Byte offset of a character column within a line
fn byte_of_col(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(idx, _)| idx)
}

/// Character column of a byte offset within a line
fn col_of_byte(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}

fn matches_in_line(re: &Regex, row: usize, line: &str) -> Vec<SearchMatch> {
    re.find_iter(line)
        .map(|m| SearchMatch {
            start: Position::new(row, col_of_byte(line, m.start())),
            end: Position::new(row, col_of_byte(line, m.end())),
        })
        .collect()
}

/// Find the first match at or after (forward) / strictly before (backward)
/// the starting position. Does not wrap; callers layer wrap-around on top.
#[must_use]
pub fn find(lines: &[String], pattern: &str, opts: &SearchOptions) -> Option<SearchMatch> {
    let re = compile(pattern, opts)?;
    if lines.is_empty() {
        return None;
    }

    if opts.backwards {
        for row in (0..=opts.start.row.min(lines.len() - 1)).rev() {
            let line = &lines[row];
            let mut candidates = matches_in_line(&re, row, line);
            if row == opts.start.row {
                candidates.retain(|m| m.start.col < opts.start.col);
            }
            if let Some(m) = candidates.last() {
                return Some(*m);
            }
        }
        None
    } else {
        for (row, line) in lines.iter().enumerate().skip(opts.start.row) {
            let from_byte = if row == opts.start.row {
                byte_of_col(line, opts.start.col)
            } else {
                0
            };
            if let Some(m) = re.find_at(line, from_byte) {
                return Some(SearchMatch {
                    start: Position::new(row, col_of_byte(line, m.start())),
                    end: Position::new(row, col_of_byte(line, m.end())),
                });
            }
        }
        None
    }
}

/// Every match in the buffer, in document order
#[must_use]
pub fn find_all(lines: &[String], pattern: &str, opts: &SearchOptions) -> Vec<SearchMatch> {
    let Some(re) = compile(pattern, opts) else {
        return Vec::new();
    };
    lines
        .iter()
        .enumerate()
        .flat_map(|(row, line)| matches_in_line(&re, row, line))
        .collect()
}
