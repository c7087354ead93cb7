//! Test utilities
//! Shared testing helpers: a manual clock, a memory-backed session
//! builder, and key feeding

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::fs::MemoryFileSystem;
use crate::key::parse_key_sequence;
use crate::keymap::Clock;
use crate::session::EditorSession;
use crate::split::Rect;

/// Manually advanced clock for deterministic timeout tests
#[derive(Clone)]
pub struct TestClock {
    now: Rc<Cell<Instant>>,
}

impl TestClock {
    #[must_use]
    pub fn new() -> Self {
        TestClock {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now
            .set(self.now.get() + Duration::from_millis(ms));
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Default test viewport
#[must_use]
pub fn test_area() -> Rect {
    Rect::new(0, 0, 24, 80)
}

/// A session over a memory file system and manual clock, seeded with the
/// given buffer content
pub fn session_with_lines(lines: &[&str]) -> (EditorSession, TestClock) {
    let clock = TestClock::new();
    let mut fs = MemoryFileSystem::new();
    fs.seed("/test/buffer.txt", format!("{}\n", lines.join("\n")));
    let mut session =
        EditorSession::with_collaborators(test_area(), Box::new(fs), Box::new(clock.clone()));
    session
        .open_file("/test/buffer.txt")
        .expect("seeded file opens");
    session.clear_status();
    (session, clock)
}

/// An empty session over a memory file system and manual clock
pub fn empty_session() -> (EditorSession, TestClock) {
    let clock = TestClock::new();
    let fs = MemoryFileSystem::new();
    let session =
        EditorSession::with_collaborators(test_area(), Box::new(fs), Box::new(clock.clone()));
    (session, clock)
}

/// Feed a trigger-notation key string (`"2dw"`, `"<Esc>"`) into the
/// session, one key at a time
pub fn feed(session: &mut EditorSession, keys: &str) {
    for key in parse_key_sequence(keys).expect("valid key notation") {
        session.feed_key(key);
    }
}

/// Current buffer content as owned lines, for assertions
#[must_use]
pub fn buffer_lines(session: &EditorSession) -> Vec<String> {
    session.active_buffer().lines().to_vec()
}
