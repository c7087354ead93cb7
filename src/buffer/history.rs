//! Linear undo/redo history
//!
//! Each entry is a full snapshot of the line array plus the cursor. The
//! history is a capped linear stack: undoing and then editing truncates the
//! redo tail, never branches.

use super::Position;

/// One recorded buffer state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
}

/// Capped linear undo/redo stacks
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    cap: usize,
}

/// Default number of retained undo states
pub const DEFAULT_UNDO_CAP: usize = 1000;

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_UNDO_CAP)
    }

    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        History {
            undo: Vec::new(),
            redo: Vec::new(),
            cap,
        }
    }

    /// Record the pre-mutation state. Any new edit discards the redo tail.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.redo.clear();
        self.undo.push(snapshot);
        if self.undo.len() > self.cap {
            let excess = self.undo.len() - self.cap;
            self.undo.drain(..excess);
        }
    }

    /// Step back one state. `current` is saved for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward one state. `current` is saved for undo (without
    /// touching the redo tail).
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
