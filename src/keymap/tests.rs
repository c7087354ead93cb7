use std::cell::Cell;
use std::time::{Duration, Instant};

use super::*;
use crate::key::parse_key_sequence;

fn entry(trigger: &str, action: &str) -> KeymapEntry {
    KeymapEntry {
        trigger: parse_key_sequence(trigger).unwrap(),
        action: MappedAction::Named(action.to_string()),
        flags: KeymapFlags::default(),
        buffer: None,
    }
}

fn named(result: &MatchResult<'_>) -> Option<String> {
    let (MatchResult::Exact(e) | MatchResult::Ambiguous(e)) = result else {
        return None;
    };
    match &e.action {
        MappedAction::Named(name) => Some(name.clone()),
        MappedAction::Keys(_) => None,
    }
}

/// Manually advanced clock for deterministic deadline tests
struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    fn new() -> Self {
        ManualClock {
            now: Cell::new(Instant::now()),
        }
    }

    fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

const TIMEOUT: Duration = Duration::from_millis(1000);

fn keys(s: &str) -> Vec<Key> {
    parse_key_sequence(s).unwrap()
}

// ============================================================
// Registry lookup
// ============================================================

#[test]
fn exact_and_prefix_matching() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("dd", "delete-line"));

    assert_eq!(map.lookup(MapMode::Normal, None, &keys("d")), MatchResult::Prefix);
    assert_eq!(
        named(&map.lookup(MapMode::Normal, None, &keys("dd"))),
        Some("delete-line".to_string())
    );
    assert_eq!(map.lookup(MapMode::Normal, None, &keys("x")), MatchResult::None);
}

#[test]
fn shared_prefix_reports_ambiguous() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("d", "operator-delete"));
    map.register(&[MapMode::Normal], entry("dd", "delete-line"));

    let result = map.lookup(MapMode::Normal, None, &keys("d"));
    assert!(matches!(result, MatchResult::Ambiguous(_)));
    assert_eq!(named(&result), Some("operator-delete".to_string()));
}

#[test]
fn last_write_wins_for_duplicate_trigger() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("q", "first"));
    map.register(&[MapMode::Normal], entry("q", "second"));

    assert_eq!(
        named(&map.lookup(MapMode::Normal, None, &keys("q"))),
        Some("second".to_string())
    );
}

#[test]
fn modes_are_isolated() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Insert], entry("jk", "escape"));

    assert_eq!(map.lookup(MapMode::Normal, None, &keys("jk")), MatchResult::None);
    assert_eq!(map.lookup(MapMode::Insert, None, &keys("j")), MatchResult::Prefix);
}

#[test]
fn buffer_local_shadows_global() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("q", "global"));
    let mut local = entry("q", "local");
    local.buffer = Some(3);
    map.register(&[MapMode::Normal], local);

    assert_eq!(
        named(&map.lookup(MapMode::Normal, Some(3), &keys("q"))),
        Some("local".to_string())
    );
    assert_eq!(
        named(&map.lookup(MapMode::Normal, Some(4), &keys("q"))),
        Some("global".to_string())
    );
}

// ============================================================
// Resolver policy
// ============================================================

#[test]
fn unambiguous_match_commits_immediately() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("dd", "delete-line"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    let first = resolver.feed(&map, MapMode::Normal, None, Key::Char('d'), TIMEOUT, &clock);
    assert_eq!(first, Resolution::Pending);
    assert!(resolver.deadline().is_some());

    let second = resolver.feed(&map, MapMode::Normal, None, Key::Char('d'), TIMEOUT, &clock);
    let Resolution::Mapped { entry, leftover } = second else {
        panic!("expected a committed mapping");
    };
    assert_eq!(entry.action, MappedAction::Named("delete-line".to_string()));
    assert!(leftover.is_empty());
    assert!(resolver.is_idle());
    assert!(resolver.deadline().is_none());
}

#[test]
fn ambiguous_match_waits_for_timeout() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("d", "short"));
    map.register(&[MapMode::Normal], entry("dd", "long"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    assert_eq!(
        resolver.feed(&map, MapMode::Normal, None, Key::Char('d'), TIMEOUT, &clock),
        Resolution::Pending
    );

    // Before the deadline nothing fires
    clock.advance(Duration::from_millis(999));
    assert_eq!(resolver.poll(&clock), None);

    // At the deadline the short match commits
    clock.advance(Duration::from_millis(1));
    let Some(Resolution::Mapped { entry, .. }) = resolver.poll(&clock) else {
        panic!("expected the timeout to commit the short match");
    };
    assert_eq!(entry.action, MappedAction::Named("short".to_string()));
}

#[test]
fn longer_sequence_wins_within_timeout() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("d", "short"));
    map.register(&[MapMode::Normal], entry("dd", "long"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    resolver.feed(&map, MapMode::Normal, None, Key::Char('d'), TIMEOUT, &clock);
    clock.advance(Duration::from_millis(500));
    let result = resolver.feed(&map, MapMode::Normal, None, Key::Char('d'), TIMEOUT, &clock);

    let Resolution::Mapped { entry, .. } = result else {
        panic!("expected the long match to commit");
    };
    assert_eq!(entry.action, MappedAction::Named("long".to_string()));
    // The short match never fires afterwards
    clock.advance(TIMEOUT * 2);
    assert_eq!(resolver.poll(&clock), None);
}

#[test]
fn unrelated_key_commits_best_match_with_leftover() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("d", "short"));
    map.register(&[MapMode::Normal], entry("dd", "long"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    resolver.feed(&map, MapMode::Normal, None, Key::Char('d'), TIMEOUT, &clock);
    let result = resolver.feed(&map, MapMode::Normal, None, Key::Char('x'), TIMEOUT, &clock);

    let Resolution::Mapped { entry, leftover } = result else {
        panic!("expected the short match to commit");
    };
    assert_eq!(entry.action, MappedAction::Named("short".to_string()));
    assert_eq!(leftover, vec![Key::Char('x')]);
}

#[test]
fn unmatched_keys_flush_raw() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("gg", "top"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    assert_eq!(
        resolver.feed(&map, MapMode::Normal, None, Key::Char('x'), TIMEOUT, &clock),
        Resolution::Unmapped(vec![Key::Char('x')])
    );
}

#[test]
fn prefix_timeout_flushes_raw_keys() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("gg", "top"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    assert_eq!(
        resolver.feed(&map, MapMode::Normal, None, Key::Char('g'), TIMEOUT, &clock),
        Resolution::Pending
    );
    clock.advance(TIMEOUT);
    assert_eq!(
        resolver.poll(&clock),
        Some(Resolution::Unmapped(vec![Key::Char('g')]))
    );
    assert!(resolver.is_idle());
}

#[test]
fn each_keystroke_restarts_the_timer() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("abc", "deep"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    resolver.feed(&map, MapMode::Normal, None, Key::Char('a'), TIMEOUT, &clock);
    clock.advance(Duration::from_millis(900));
    resolver.feed(&map, MapMode::Normal, None, Key::Char('b'), TIMEOUT, &clock);
    clock.advance(Duration::from_millis(900));
    // 1800ms after the first key, but only 900ms after the last one
    assert_eq!(resolver.poll(&clock), None);
}

#[test]
fn nowait_commits_despite_longer_trigger() {
    let mut map = Keymap::new();
    let mut short = entry("d", "short");
    short.flags.nowait = true;
    map.register(&[MapMode::Normal], short);
    map.register(&[MapMode::Normal], entry("dd", "long"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    let result = resolver.feed(&map, MapMode::Normal, None, Key::Char('d'), TIMEOUT, &clock);
    let Resolution::Mapped { entry, .. } = result else {
        panic!("expected nowait to commit immediately");
    };
    assert_eq!(entry.action, MappedAction::Named("short".to_string()));
}

#[test]
fn reset_discards_pending_state() {
    let mut map = Keymap::new();
    map.register(&[MapMode::Normal], entry("gg", "top"));
    let clock = ManualClock::new();
    let mut resolver = KeyResolver::new();

    resolver.feed(&map, MapMode::Normal, None, Key::Char('g'), TIMEOUT, &clock);
    resolver.reset();
    assert!(resolver.is_idle());
    clock.advance(TIMEOUT * 2);
    assert_eq!(resolver.poll(&clock), None);
}
