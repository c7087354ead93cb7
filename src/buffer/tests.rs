use super::search::SearchOptions;
use super::*;

fn buffer(lines: &[&str]) -> TextBuffer {
    TextBuffer::from_text(1, "test", &lines.join("\n"))
}

// ============================================================
// Construction & invariants
// ============================================================

#[test]
fn new_buffer_has_one_empty_line() {
    let buf = TextBuffer::new(1, "scratch");
    assert_eq!(buf.line_count(), 1);
    assert_eq!(buf.line(0), Some(""));
    assert_eq!(buf.cursor(), Position::new(0, 0));
    assert!(!buf.modified);
}

#[test]
fn from_text_splits_lines() {
    let buf = buffer(&["alpha", "beta", "gamma"]);
    assert_eq!(buf.line_count(), 3);
    assert_eq!(buf.line(1), Some("beta"));
    assert_eq!(buf.line(3), None);
}

#[test]
fn delete_last_line_keeps_one_empty_line() {
    let mut buf = buffer(&["only"]);
    assert_eq!(buf.delete_line(0), Some("only".to_string()));
    assert_eq!(buf.line_count(), 1);
    assert_eq!(buf.line(0), Some(""));
}

// ============================================================
// Cursor clamping
// ============================================================

#[test]
fn set_cursor_clamps_row_and_col() {
    let mut buf = buffer(&["hello", "hi"]);
    buf.set_cursor(99, 99);
    assert_eq!(buf.cursor(), Position::new(1, 2));
    buf.set_cursor(0, 3);
    assert_eq!(buf.cursor(), Position::new(0, 3));
}

#[test]
fn set_cursor_is_idempotent() {
    let mut buf = buffer(&["hello"]);
    buf.set_cursor(7, 42);
    let first = buf.cursor();
    buf.set_cursor(7, 42);
    assert_eq!(buf.cursor(), first);
}

#[test]
fn mutation_reclamps_cursor() {
    let mut buf = buffer(&["hello world"]);
    buf.set_cursor(0, 11);
    buf.replace_line(0, "hi");
    assert_eq!(buf.cursor(), Position::new(0, 2));
}

// ============================================================
// Insert / delete
// ============================================================

#[test]
fn insert_within_line() {
    let mut buf = buffer(&["helo"]);
    let end = buf.insert(Position::new(0, 2), "l");
    assert_eq!(buf.line(0), Some("hello"));
    assert_eq!(end, Position::new(0, 3));
    assert!(buf.modified);
}

#[test]
fn insert_with_newlines_spawns_lines() {
    let mut buf = buffer(&["headtail"]);
    let end = buf.insert(Position::new(0, 4), "X\nY\nZ");
    assert_eq!(buf.lines(), &["headX", "Y", "Ztail"]);
    assert_eq!(end, Position::new(2, 1));
}

#[test]
fn insert_bare_newline_splits_line() {
    let mut buf = buffer(&["headtail"]);
    buf.insert(Position::new(0, 4), "\n");
    assert_eq!(buf.lines(), &["head", "tail"]);
}

#[test]
fn delete_stops_at_line_end() {
    let mut buf = buffer(&["abc", "def"]);
    let removed = buf.delete(Position::new(0, 1), 10);
    assert_eq!(removed, "bc");
    // No merge: the next row is untouched
    assert_eq!(buf.lines(), &["a", "def"]);
}

#[test]
fn delete_range_spanning_rows_merges_boundary() {
    let mut buf = buffer(&["hello", "world", "again"]);
    let removed = buf.delete_range(Position::new(0, 3), Position::new(2, 2));
    assert_eq!(removed, "lo\nworld\nag");
    assert_eq!(buf.lines(), &["helain"]);
    assert_eq!(buf.cursor(), Position::new(0, 3));
}

#[test]
fn get_range_is_end_exclusive() {
    let buf = buffer(&["hello world"]);
    assert_eq!(buf.get_range(Position::new(0, 0), Position::new(0, 5)), "hello");
    let multi = buffer(&["ab", "cd"]);
    assert_eq!(multi.get_range(Position::new(0, 1), Position::new(1, 1)), "b\nc");
}

#[test]
fn join_lines_merges_next_row() {
    let mut buf = buffer(&["foo", "bar"]);
    assert!(buf.join_lines(0));
    assert_eq!(buf.lines(), &["foobar"]);
    assert!(!buf.join_lines(0));
}

#[test]
fn insert_and_append_line() {
    let mut buf = buffer(&["a", "c"]);
    buf.insert_line(1, "b");
    buf.append_line("d");
    assert_eq!(buf.lines(), &["a", "b", "c", "d"]);
}

// ============================================================
// Undo / redo
// ============================================================

#[test]
fn undo_round_trip_restores_lines_and_cursor() {
    let mut buf = buffer(&["hello"]);
    buf.set_cursor(0, 2);
    let before_lines: Vec<String> = buf.lines().to_vec();
    let before_cursor = buf.cursor();

    buf.insert(Position::new(0, 5), " world");
    buf.set_cursor(0, 11);
    assert!(buf.undo());
    assert_eq!(buf.lines(), &before_lines[..]);
    assert_eq!(buf.cursor(), before_cursor);

    assert!(buf.redo());
    assert_eq!(buf.line(0), Some("hello world"));
    assert_eq!(buf.cursor(), Position::new(0, 11));
}

#[test]
fn new_edit_truncates_redo_tail() {
    let mut buf = buffer(&["a"]);
    buf.insert(Position::new(0, 1), "b");
    buf.undo();
    assert!(buf.can_redo());
    buf.insert(Position::new(0, 1), "c");
    assert!(!buf.can_redo());
    assert_eq!(buf.line(0), Some("ac"));
}

#[test]
fn undo_with_empty_history_is_rejected() {
    let mut buf = buffer(&["a"]);
    assert!(!buf.undo());
    assert!(!buf.redo());
}

#[test]
fn undo_group_collapses_multiple_edits() {
    let mut buf = buffer(&["one", "two"]);
    buf.begin_undo_group();
    buf.replace_line(0, "ONE");
    buf.delete_line(1);
    buf.end_undo_group();

    assert!(buf.undo());
    assert_eq!(buf.lines(), &["one", "two"]);
}

#[test]
fn history_cap_drops_oldest_entries() {
    let mut buf = buffer(&["x"]);
    for i in 0..history::DEFAULT_UNDO_CAP + 10 {
        buf.replace_line(0, format!("{i}"));
    }
    let mut undone = 0;
    while buf.undo() {
        undone += 1;
    }
    assert_eq!(undone, history::DEFAULT_UNDO_CAP);
}

// ============================================================
// Marks
// ============================================================

#[test]
fn mark_round_trip() {
    let mut buf = buffer(&["abc", "def"]);
    buf.set_mark('a', Position::new(1, 2));
    assert_eq!(buf.mark('a'), Some(Position::new(1, 2)));
    assert_eq!(buf.mark('b'), None);
}

// ============================================================
// Search
// ============================================================

#[test]
fn find_forward_from_position() {
    let buf = buffer(&["one two", "two three"]);
    let opts = SearchOptions {
        start: Position::new(0, 4),
        ..SearchOptions::default()
    };
    let m = buf.find("two", &opts).unwrap();
    assert_eq!(m.start, Position::new(0, 4));

    let opts = SearchOptions {
        start: Position::new(0, 5),
        ..SearchOptions::default()
    };
    let m = buf.find("two", &opts).unwrap();
    assert_eq!(m.start, Position::new(1, 0));
}

#[test]
fn find_backwards_takes_last_match_before_start() {
    let buf = buffer(&["aba aba"]);
    let opts = SearchOptions {
        start: Position::new(0, 6),
        backwards: true,
        ..SearchOptions::default()
    };
    let m = buf.find("ab", &opts).unwrap();
    assert_eq!(m.start, Position::new(0, 4));
}

#[test]
fn find_case_insensitive() {
    let buf = buffer(&["Hello"]);
    let opts = SearchOptions {
        case_sensitive: false,
        ..SearchOptions::default()
    };
    assert!(buf.find("hello", &opts).is_some());
    assert!(buf.find("hello", &SearchOptions::default()).is_none());
}

#[test]
fn find_literal_escapes_metacharacters() {
    let buf = buffer(&["a.c abc"]);
    let opts = SearchOptions {
        regex: false,
        ..SearchOptions::default()
    };
    let m = buf.find("a.c", &opts).unwrap();
    assert_eq!(m.start, Position::new(0, 0));
    assert_eq!(buf.find_all("a.c", &opts).len(), 1);
}

#[test]
fn invalid_pattern_yields_no_match() {
    let buf = buffer(&["anything"]);
    assert_eq!(buf.find("[unclosed", &SearchOptions::default()), None);
    assert!(buf.find_all("[unclosed", &SearchOptions::default()).is_empty());
}

#[test]
fn find_all_returns_document_order() {
    let buf = buffer(&["x x", "x"]);
    let matches = buf.find_all("x", &SearchOptions::default());
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].start, Position::new(0, 0));
    assert_eq!(matches[2].start, Position::new(1, 0));
}
