//! Keybinding registry
//!
//! ## keymap/ Invariants
//!
//! - Entries are stored per mode; buffer-local entries shadow global ones.
//! - Re-registering a trigger for the same mode replaces the prior entry.
//! - Lookup never mutates state; resolution policy lives in
//!   [`resolver`].

pub mod resolver;
pub mod trie;

pub use resolver::{Clock, KeyResolver, Resolution, SystemClock};
pub use trie::{MatchResult, TrieNode};

use std::collections::HashMap;

use crate::buffer::BufferId;
use crate::key::Key;
use crate::mode::Mode;

/// Mode bucket for mappings; all visual kinds share one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapMode {
    Normal,
    Insert,
    Visual,
    Command,
    Replace,
}

impl From<Mode> for MapMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => MapMode::Normal,
            Mode::Insert => MapMode::Insert,
            Mode::Visual(_) => MapMode::Visual,
            Mode::Command => MapMode::Command,
            Mode::Replace => MapMode::Replace,
        }
    }
}

/// Behavior flags on a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeymapFlags {
    /// Suppress command-line echo of the expansion
    pub silent: bool,
    /// The replacement keys are not themselves remapped
    pub noremap: bool,
    /// The action is evaluated as an expression by the host
    pub expr: bool,
    /// Commit immediately even when a longer trigger could follow
    pub nowait: bool,
}

/// What a trigger resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum MappedAction {
    /// Replay a key sequence (subject to remapping unless `noremap`)
    Keys(Vec<Key>),
    /// A named editor action the session dispatches directly
    Named(String),
}

/// One keybinding
#[derive(Debug, Clone, PartialEq)]
pub struct KeymapEntry {
    pub trigger: Vec<Key>,
    pub action: MappedAction,
    pub flags: KeymapFlags,
    /// Restrict the mapping to one buffer
    pub buffer: Option<BufferId>,
}

/// Keybinding registry: per-mode tries, with buffer-local shadowing
#[derive(Debug, Default)]
pub struct Keymap {
    global: HashMap<MapMode, TrieNode>,
    buffer_local: HashMap<(BufferId, MapMode), TrieNode>,
}

impl Keymap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry for every mode in `modes`
    pub fn register(&mut self, modes: &[MapMode], entry: KeymapEntry) {
        for &mode in modes {
            let trie = match entry.buffer {
                Some(id) => self.buffer_local.entry((id, mode)).or_default(),
                None => self.global.entry(mode).or_default(),
            };
            trie.insert(&entry.trigger, entry.clone());
        }
    }

    /// Match an accumulated sequence for a mode. Buffer-local mappings for
    /// the active buffer are consulted first.
    pub fn lookup<'a>(
        &'a self,
        mode: MapMode,
        buffer: Option<BufferId>,
        keys: &[Key],
    ) -> MatchResult<'a> {
        if let Some(id) = buffer {
            if let Some(trie) = self.buffer_local.get(&(id, mode)) {
                match trie.lookup(keys) {
                    MatchResult::None => {}
                    found => return found,
                }
            }
        }
        match self.global.get(&mode) {
            Some(trie) => trie.lookup(keys),
            None => MatchResult::None,
        }
    }

    /// True when no mapping exists for the mode at all
    #[must_use]
    pub fn is_empty_for(&self, mode: MapMode) -> bool {
        self.global.get(&mode).is_none_or(TrieNode::is_empty)
            && !self.buffer_local.keys().any(|(_, m)| *m == mode)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
