//! Multi-key sequence resolution
//!
//! Implements the ambiguity/timeout policy over the trie: each keystroke
//! is appended to a pending buffer; an unambiguous exact match commits
//! immediately and cancels the timer, anything else (re)starts a
//! single-shot deadline of `timeoutlen`. When the deadline expires the
//! best accumulated exact match commits, or, absent one, the raw keys are
//! flushed unmapped. Time is injected through [`Clock`] so the policy is
//! deterministic under test.

use std::time::{Duration, Instant};

use crate::buffer::BufferId;
use crate::key::Key;

use super::trie::MatchResult;
use super::{Keymap, KeymapEntry, MapMode};

/// Time source for the ambiguity deadline
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Outcome of feeding one key (or of a deadline expiry)
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Still accumulating; a deadline may be armed
    Pending,
    /// A mapping committed. `leftover` keys were consumed past the
    /// trigger and must be reprocessed by the caller.
    Mapped {
        entry: KeymapEntry,
        leftover: Vec<Key>,
    },
    /// No mapping consumed these keys; forward them to the mode engine
    /// unmapped.
    Unmapped(Vec<Key>),
}

/// Per-session resolver state: the pending key buffer and its deadline
#[derive(Debug, Default)]
pub struct KeyResolver {
    pending: Vec<Key>,
    deadline: Option<Instant>,
    /// Best complete match so far: the entry plus how many pending keys
    /// its trigger consumed
    best: Option<(KeymapEntry, usize)>,
}

impl KeyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No keys are buffered and no deadline is armed
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn pending_keys(&self) -> &[Key] {
        &self.pending
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Append a keystroke and resolve it against the keymap
    pub fn feed(
        &mut self,
        keymap: &Keymap,
        mode: MapMode,
        buffer: Option<BufferId>,
        key: Key,
        timeoutlen: Duration,
        clock: &dyn Clock,
    ) -> Resolution {
        self.pending.push(key);

        match keymap.lookup(mode, buffer, &self.pending) {
            MatchResult::Exact(entry) => {
                let entry = entry.clone();
                self.commit(entry, self.pending.len())
            }
            MatchResult::Ambiguous(entry) => {
                let entry = entry.clone();
                if entry.flags.nowait {
                    let consumed = self.pending.len();
                    return self.commit(entry, consumed);
                }
                self.best = Some((entry, self.pending.len()));
                self.deadline = Some(clock.now() + timeoutlen);
                Resolution::Pending
            }
            MatchResult::Prefix => {
                self.deadline = Some(clock.now() + timeoutlen);
                Resolution::Pending
            }
            MatchResult::None => match self.best.take() {
                Some((entry, consumed)) => self.commit(entry, consumed),
                None => {
                    self.deadline = None;
                    Resolution::Unmapped(std::mem::take(&mut self.pending))
                }
            },
        }
    }

    /// Check the deadline; on expiry, commit the best accumulated match or
    /// flush the buffer unmapped. Returns `None` while the timer has not
    /// fired (or is not armed).
    pub fn poll(&mut self, clock: &dyn Clock) -> Option<Resolution> {
        let deadline = self.deadline?;
        if clock.now() < deadline {
            return None;
        }
        self.deadline = None;
        match self.best.take() {
            Some((entry, consumed)) => Some(self.commit(entry, consumed)),
            None => Some(Resolution::Unmapped(std::mem::take(&mut self.pending))),
        }
    }

    /// Drop all buffered keys (e.g. on an explicit cancel)
    pub fn reset(&mut self) {
        self.pending.clear();
        self.deadline = None;
        self.best = None;
    }

    fn commit(&mut self, entry: KeymapEntry, consumed: usize) -> Resolution {
        let leftover = self.pending.split_off(consumed.min(self.pending.len()));
        self.pending.clear();
        self.deadline = None;
        self.best = None;
        Resolution::Mapped { entry, leftover }
    }
}
