//! Line-oriented text buffer
//!
//! ## buffer/ Invariants
//!
//! - A buffer always contains at least one line.
//! - The cursor satisfies `row < line_count` and `col <= len(line[row])`.
//! - Every mutating operation re-establishes both invariants before
//!   returning.
//! - A snapshot of the pre-mutation state is recorded before each edit;
//!   editing after an undo truncates the redo tail.
//! - `delete` never merges lines; row-merging is the distinct
//!   `delete_range`/`join_lines` responsibility.

pub mod history;
pub mod search;

use std::collections::HashMap;
use std::path::PathBuf;

use history::{History, Snapshot};
use search::{SearchMatch, SearchOptions};

/// Unique buffer identity
pub type BufferId = u64;

/// Position in a buffer (0-indexed row, character column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Granularity of a selection span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Charwise,
    Linewise,
    Blockwise,
}

/// An active selection; `start` is the anchor, `end` follows the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
    pub kind: SelectionKind,
}

impl Selection {
    /// Anchor/cursor normalized so start <= end
    #[must_use]
    pub fn ordered(&self) -> (Position, Position) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

/// Line-oriented mutable text storage with cursor, marks, and history
#[derive(Debug, Clone)]
pub struct TextBuffer {
    id: BufferId,
    /// Display name shown in the status line
    pub name: String,
    /// Backing file, if any
    pub path: Option<PathBuf>,
    /// Filetype tag (derived from the path extension on open)
    pub filetype: Option<String>,
    /// Buffer differs from its backing file
    pub modified: bool,
    /// Writes are rejected
    pub readonly: bool,
    lines: Vec<String>,
    cursor: Position,
    selection: Option<Selection>,
    marks: HashMap<char, Position>,
    history: History,
    undo_group_open: bool,
}

impl TextBuffer {
    /// Create an empty buffer with a single empty line
    #[must_use]
    pub fn new(id: BufferId, name: impl Into<String>) -> Self {
        TextBuffer {
            id,
            name: name.into(),
            path: None,
            filetype: None,
            modified: false,
            readonly: false,
            lines: vec![String::new()],
            cursor: Position::default(),
            selection: None,
            marks: HashMap::new(),
            history: History::new(),
            undo_group_open: false,
        }
    }

    /// Create a buffer from file content, splitting on newlines
    #[must_use]
    pub fn from_text(id: BufferId, name: impl Into<String>, text: &str) -> Self {
        let mut buffer = Self::new(id, name);
        buffer.lines = text.split('\n').map(str::to_string).collect();
        if buffer.lines.is_empty() {
            buffer.lines.push(String::new());
        }
        buffer
    }

    #[must_use]
    pub fn id(&self) -> BufferId {
        self.id
    }

    // ============================================================
    // Read access
    // ============================================================

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Character length of a line (0 for out-of-range rows)
    #[must_use]
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Character at a position, if the position is on a character
    #[must_use]
    pub fn char_at(&self, pos: Position) -> Option<char> {
        self.lines.get(pos.row)?.chars().nth(pos.col)
    }

    /// Text of the end-exclusive range `[start, end)`, rows joined by `\n`
    #[must_use]
    pub fn get_range(&self, start: Position, end: Position) -> String {
        if end <= start || start.row >= self.lines.len() {
            return String::new();
        }
        let end_row = end.row.min(self.lines.len() - 1);
        if start.row == end_row {
            return slice_chars(&self.lines[start.row], start.col, end.col);
        }
        let mut out = String::new();
        let first = &self.lines[start.row];
        out.push_str(&slice_chars(first, start.col, first.chars().count()));
        for row in start.row + 1..end_row {
            out.push('\n');
            out.push_str(&self.lines[row]);
        }
        out.push('\n');
        out.push_str(&slice_chars(&self.lines[end_row], 0, end.col));
        out
    }

    /// Full buffer content joined by `\n`
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    // ============================================================
    // Cursor / selection / marks
    // ============================================================

    #[must_use]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamping into valid bounds. Never errors; applying
    /// the same coordinates twice yields the same state.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.lines.len() - 1);
        let col = col.min(self.line_len(row));
        self.cursor = Position::new(row, col);
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    pub fn set_mark(&mut self, name: char, pos: Position) {
        self.marks.insert(name, pos);
    }

    #[must_use]
    pub fn mark(&self, name: char) -> Option<Position> {
        self.marks.get(&name).copied()
    }

    // ============================================================
    // Undo grouping
    // ============================================================

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.lines.clone(),
            cursor: self.cursor,
        }
    }

    fn record(&mut self) {
        if !self.undo_group_open {
            let snapshot = self.snapshot();
            self.history.push(snapshot);
        }
        self.modified = true;
    }

    /// Open an undo group: one snapshot covers every mutation until
    /// [`Self::end_undo_group`]. Opening an already-open group is a no-op.
    pub fn begin_undo_group(&mut self) {
        if !self.undo_group_open {
            let snapshot = self.snapshot();
            self.history.push(snapshot);
            self.undo_group_open = true;
        }
    }

    pub fn end_undo_group(&mut self) {
        self.undo_group_open = false;
    }

    #[must_use]
    pub fn undo_group_open(&self) -> bool {
        self.undo_group_open
    }

    // ============================================================
    // Mutation
    // ============================================================

    /// Insert text at a position. The line is split at the insertion point;
    /// embedded newlines spawn new lines. Returns the position just past the
    /// inserted text.
    pub fn insert(&mut self, pos: Position, text: &str) -> Position {
        self.record();
        let row = pos.row.min(self.lines.len() - 1);
        let col = pos.col.min(self.line_len(row));

        let line = &self.lines[row];
        let head = slice_chars(line, 0, col);
        let tail = slice_chars(line, col, line.chars().count());

        let mut parts: Vec<&str> = text.split('\n').collect();
        let end;
        if parts.len() == 1 {
            self.lines[row] = format!("{head}{text}{tail}");
            end = Position::new(row, col + text.chars().count());
        } else {
            let last = parts.pop().unwrap_or("");
            let mut new_lines = Vec::with_capacity(parts.len() + 1);
            new_lines.push(format!("{head}{}", parts[0]));
            for part in &parts[1..] {
                new_lines.push((*part).to_string());
            }
            end = Position::new(row + parts.len(), last.chars().count());
            new_lines.push(format!("{last}{tail}"));
            self.lines.splice(row..=row, new_lines);
        }
        self.clamp_cursor();
        end
    }

    /// Delete up to `length` characters starting at `pos`, within the line
    /// only. Deletion stops at the end of the line. Returns the removed
    /// text.
    pub fn delete(&mut self, pos: Position, length: usize) -> String {
        if pos.row >= self.lines.len() || length == 0 {
            return String::new();
        }
        self.record();
        let line = &self.lines[pos.row];
        let len = line.chars().count();
        let start = pos.col.min(len);
        let end = (pos.col + length).min(len);
        let removed = slice_chars(line, start, end);
        let head = slice_chars(line, 0, start);
        let tail = slice_chars(line, end, len);
        self.lines[pos.row] = format!("{head}{tail}");
        self.clamp_cursor();
        removed
    }

    /// Delete the end-exclusive character range `[start, end)`, merging the
    /// boundary rows when the range spans lines. Returns the removed text.
    pub fn delete_range(&mut self, start: Position, end: Position) -> String {
        if end <= start || start.row >= self.lines.len() {
            return String::new();
        }
        let removed = self.get_range(start, end);
        self.record();
        let end_row = end.row.min(self.lines.len() - 1);
        let head = slice_chars(&self.lines[start.row], 0, start.col);
        let tail_line = &self.lines[end_row];
        let tail_len = tail_line.chars().count();
        let tail = slice_chars(tail_line, end.col.min(tail_len), tail_len);
        self.lines.splice(start.row..=end_row, [format!("{head}{tail}")]);
        self.set_cursor(start.row, start.col);
        removed
    }

    /// Remove a whole line. The buffer keeps its last line by replacing it
    /// with an empty one. Returns the removed content.
    pub fn delete_line(&mut self, row: usize) -> Option<String> {
        if row >= self.lines.len() {
            return None;
        }
        self.record();
        let removed = if self.lines.len() == 1 {
            std::mem::take(&mut self.lines[0])
        } else {
            self.lines.remove(row)
        };
        self.clamp_cursor();
        Some(removed)
    }

    /// Replace the content of a line
    pub fn replace_line(&mut self, row: usize, text: impl Into<String>) {
        if row >= self.lines.len() {
            return;
        }
        self.record();
        self.lines[row] = text.into();
        self.clamp_cursor();
    }

    /// Insert a new line at the given row index (existing rows shift down)
    pub fn insert_line(&mut self, row: usize, text: impl Into<String>) {
        self.record();
        let row = row.min(self.lines.len());
        self.lines.insert(row, text.into());
        self.clamp_cursor();
    }

    /// Append a new line after the last row
    pub fn append_line(&mut self, text: impl Into<String>) {
        self.record();
        self.lines.push(text.into());
    }

    /// Merge line `row + 1` into `row`. The higher-level row-merging delete.
    /// Returns false when there is no following line.
    pub fn join_lines(&mut self, row: usize) -> bool {
        if row + 1 >= self.lines.len() {
            return false;
        }
        self.record();
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(&next);
        self.clamp_cursor();
        true
    }

    fn clamp_cursor(&mut self) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let col = self.cursor.col.min(self.line_len(row));
        self.cursor = Position::new(row, col);
    }

    // ============================================================
    // History
    // ============================================================

    /// Restore the previous recorded state. Returns false with no history.
    pub fn undo(&mut self) -> bool {
        self.undo_group_open = false;
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.lines = previous.lines;
                self.cursor = previous.cursor;
                self.clamp_cursor();
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone state
    pub fn redo(&mut self) -> bool {
        self.undo_group_open = false;
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.lines = next.lines;
                self.cursor = next.cursor;
                self.clamp_cursor();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ============================================================
    // Search
    // ============================================================

    /// First match for `pattern` per the search options, or `None`. An
    /// invalid regex is treated as "no match".
    #[must_use]
    pub fn find(&self, pattern: &str, opts: &SearchOptions) -> Option<SearchMatch> {
        search::find(&self.lines, pattern, opts)
    }

    /// Every match in document order; empty for an invalid pattern.
    #[must_use]
    pub fn find_all(&self, pattern: &str, opts: &SearchOptions) -> Vec<SearchMatch> {
        search::find_all(&self.lines, pattern, opts)
    }
}

/// Character-index substring (end-exclusive)
fn slice_chars(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
