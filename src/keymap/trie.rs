//! Key-sequence trie

use crate::key::Key;
use std::collections::HashMap;

use super::KeymapEntry;

/// Result of looking up a key sequence
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'a> {
    /// The sequence is exactly a registered trigger, and nothing longer
    /// starts with it
    Exact(&'a KeymapEntry),
    /// The sequence is a strict prefix of at least one trigger but is not
    /// itself bound
    Prefix,
    /// The sequence is itself bound AND a strict prefix of a longer
    /// trigger (e.g. `d` when both `d` and `dd` are mapped)
    Ambiguous(&'a KeymapEntry),
    /// No trigger matches or extends the sequence
    None,
}

/// A node in the key sequence trie
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: HashMap<Key, TrieNode>,
    entry: Option<KeymapEntry>,
}

impl TrieNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trigger. Re-inserting an existing trigger replaces the
    /// prior entry: last write wins.
    pub fn insert(&mut self, keys: &[Key], entry: KeymapEntry) {
        if keys.is_empty() {
            self.entry = Some(entry);
            return;
        }
        self.children
            .entry(keys[0])
            .or_default()
            .insert(&keys[1..], entry);
    }

    /// Look up an accumulated sequence
    pub fn lookup<'a>(&'a self, keys: &[Key]) -> MatchResult<'a> {
        if keys.is_empty() {
            return match (&self.entry, self.children.is_empty()) {
                (Some(entry), true) => MatchResult::Exact(entry),
                (Some(entry), false) => MatchResult::Ambiguous(entry),
                (None, false) => MatchResult::Prefix,
                (None, true) => MatchResult::None,
            };
        }
        match self.children.get(&keys[0]) {
            Some(child) => child.lookup(&keys[1..]),
            None => MatchResult::None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.children.is_empty()
    }
}
