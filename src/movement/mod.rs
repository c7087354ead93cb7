//! Motion algorithms
//!
//! Motions compute a destination cursor position without mutating text.
//! Word scans walk character-by-character across line boundaries; the end
//! of a line counts as a boundary. All functions take and return buffer
//! positions so the same algorithms serve Normal, Visual, and
//! operator-pending interpretation.

pub mod classify;

pub use classify::{classify_char, is_word_char, CharClass};

use crate::buffer::{Position, TextBuffer};

/// Class of the character at a position; out-of-line positions (the end of
/// a line, empty lines) classify as whitespace.
fn class_at(buf: &TextBuffer, pos: Position) -> CharClass {
    buf.char_at(pos).map_or(CharClass::Whitespace, classify_char)
}

/// Step one position forward, crossing line boundaries. The per-line
/// column range includes the end-of-line position so boundaries are seen.
fn next_position(buf: &TextBuffer, pos: Position) -> Option<Position> {
    if pos.col < buf.line_len(pos.row) {
        Some(Position::new(pos.row, pos.col + 1))
    } else if pos.row + 1 < buf.line_count() {
        Some(Position::new(pos.row + 1, 0))
    } else {
        None
    }
}

/// Step one position backward, crossing line boundaries
fn prev_position(buf: &TextBuffer, pos: Position) -> Option<Position> {
    if pos.col > 0 {
        Some(Position::new(pos.row, pos.col - 1))
    } else if pos.row > 0 {
        Some(Position::new(pos.row - 1, buf.line_len(pos.row - 1)))
    } else {
        None
    }
}

/// A position that starts a word: a non-whitespace character whose
/// predecessor is whitespace, a line boundary, or the other run class.
fn is_word_start(buf: &TextBuffer, pos: Position) -> bool {
    let class = class_at(buf, pos);
    if class == CharClass::Whitespace {
        return false;
    }
    if pos.col == 0 {
        return true;
    }
    class_at(buf, Position::new(pos.row, pos.col - 1)) != class
}

/// A position that ends a word: a non-whitespace character whose successor
/// is whitespace, a line boundary, or the other run class.
fn is_word_end(buf: &TextBuffer, pos: Position) -> bool {
    let class = class_at(buf, pos);
    if class == CharClass::Whitespace {
        return false;
    }
    class_at(buf, Position::new(pos.row, pos.col + 1)) != class
}

/// End-of-buffer position (past the last character)
fn buffer_end(buf: &TextBuffer) -> Position {
    let row = buf.line_count() - 1;
    Position::new(row, buf.line_len(row))
}

/// `w`: forward to the start of the next word, `count` times
#[must_use]
pub fn word_forward(buf: &TextBuffer, from: Position, count: usize) -> Position {
    let mut pos = from;
    for _ in 0..count.max(1) {
        let mut scan = next_position(buf, pos);
        let mut landed = None;
        while let Some(p) = scan {
            if is_word_start(buf, p) {
                landed = Some(p);
                break;
            }
            scan = next_position(buf, p);
        }
        pos = landed.unwrap_or_else(|| buffer_end(buf));
    }
    pos
}

/// `b`: backward to the start of the previous word, `count` times
#[must_use]
pub fn word_backward(buf: &TextBuffer, from: Position, count: usize) -> Position {
    let mut pos = from;
    for _ in 0..count.max(1) {
        let mut scan = prev_position(buf, pos);
        let mut landed = None;
        while let Some(p) = scan {
            if is_word_start(buf, p) {
                landed = Some(p);
                break;
            }
            scan = prev_position(buf, p);
        }
        pos = landed.unwrap_or_default();
    }
    pos
}

/// `e`: forward to the end of a word, `count` times
#[must_use]
pub fn word_end_forward(buf: &TextBuffer, from: Position, count: usize) -> Position {
    let mut pos = from;
    for _ in 0..count.max(1) {
        let mut scan = next_position(buf, pos);
        let mut landed = None;
        while let Some(p) = scan {
            if is_word_end(buf, p) {
                landed = Some(p);
                break;
            }
            scan = next_position(buf, p);
        }
        pos = landed.unwrap_or_else(|| buffer_end(buf));
    }
    pos
}

/// `ge`: backward to the end of the previous word, `count` times
#[must_use]
pub fn word_end_backward(buf: &TextBuffer, from: Position, count: usize) -> Position {
    let mut pos = from;
    for _ in 0..count.max(1) {
        let mut scan = prev_position(buf, pos);
        let mut landed = None;
        while let Some(p) = scan {
            if is_word_end(buf, p) {
                landed = Some(p);
                break;
            }
            scan = prev_position(buf, p);
        }
        pos = landed.unwrap_or_default();
    }
    pos
}

/// Column of the first non-blank character of a line (0 for blank lines)
#[must_use]
pub fn first_non_blank(line: &str) -> usize {
    line.chars()
        .position(|c| !c.is_whitespace())
        .unwrap_or(0)
}

const BRACKET_PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

/// `%`: match the bracket under the cursor by depth counting
///
/// Returns `None` when the cursor is not on one of `()[]{}` or the
/// partner is missing.
#[must_use]
pub fn match_bracket(buf: &TextBuffer, pos: Position) -> Option<Position> {
    let c = buf.char_at(pos)?;

    if let Some(&(open, close)) = BRACKET_PAIRS.iter().find(|(o, _)| *o == c) {
        let mut depth = 0usize;
        let mut scan = Some(pos);
        while let Some(p) = scan {
            match buf.char_at(p) {
                Some(ch) if ch == open => depth += 1,
                Some(ch) if ch == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(p);
                    }
                }
                _ => {}
            }
            scan = next_position(buf, p);
        }
        return None;
    }

    if let Some(&(open, close)) = BRACKET_PAIRS.iter().find(|(_, c2)| *c2 == c) {
        let mut depth = 0usize;
        let mut scan = Some(pos);
        while let Some(p) = scan {
            match buf.char_at(p) {
                Some(ch) if ch == close => depth += 1,
                Some(ch) if ch == open => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(p);
                    }
                }
                _ => {}
            }
            scan = prev_position(buf, p);
        }
        return None;
    }

    None
}
