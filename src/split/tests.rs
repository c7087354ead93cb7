use super::*;
use crate::buffer::Position;

fn area() -> Rect {
    Rect::new(0, 0, 24, 80)
}

// ============================================================
// Tree construction & splitting
// ============================================================

#[test]
fn single_window_tree() {
    let tree = SplitTree::new(1, area());
    assert_eq!(tree.window_count(), 1);
    assert_eq!(tree.focused_window().buffer, 1);
    assert_eq!(tree.focused_window().rect, area());
    assert!(tree.focused_window().valid);
}

#[test]
fn horizontal_split_uses_floor_arithmetic() {
    let mut tree = SplitTree::new(1, Rect::new(0, 0, 25, 80));
    let first = tree.focused_id();
    let second = tree.split(SplitOrientation::Horizontal);

    let top = tree.window(first).unwrap().rect;
    let bottom = tree.window(second).unwrap().rect;
    assert_eq!(top, Rect::new(0, 0, 12, 80));
    assert_eq!(bottom, Rect::new(12, 0, 13, 80));
}

#[test]
fn vertical_split_divides_width() {
    let mut tree = SplitTree::new(1, Rect::new(0, 0, 24, 81));
    let first = tree.focused_id();
    let second = tree.split(SplitOrientation::Vertical);

    let left = tree.window(first).unwrap().rect;
    let right = tree.window(second).unwrap().rect;
    assert_eq!(left, Rect::new(0, 0, 24, 40));
    assert_eq!(right, Rect::new(0, 40, 24, 41));
}

#[test]
fn split_shares_the_buffer_and_takes_focus() {
    let mut tree = SplitTree::new(7, area());
    let second = tree.split(SplitOrientation::Horizontal);
    assert_eq!(tree.window(second).unwrap().buffer, 7);
    assert_eq!(tree.focused_id(), second);
}

#[test]
fn leaf_order_is_tree_order() {
    let mut tree = SplitTree::new(1, area());
    let w1 = tree.focused_id();
    let w2 = tree.split(SplitOrientation::Horizontal);
    tree.set_focus(w1);
    let w3 = tree.split(SplitOrientation::Vertical);
    assert_eq!(tree.leaf_order(), vec![w1, w3, w2]);
}

// ============================================================
// Closing
// ============================================================

#[test]
fn close_merges_sibling_into_parent() {
    let mut tree = SplitTree::new(1, area());
    let first = tree.focused_id();
    let second = tree.split(SplitOrientation::Horizontal);

    assert!(tree.close_window(second));
    assert_eq!(tree.window_count(), 1);
    // Sibling absorbed the whole area again
    assert_eq!(tree.window(first).unwrap().rect, area());
}

#[test]
fn close_last_window_is_rejected() {
    let mut tree = SplitTree::new(1, area());
    let only = tree.focused_id();
    assert!(!tree.close_window(only));
    assert_eq!(tree.window_count(), 1);
}

#[test]
fn close_focused_window_moves_focus() {
    let mut tree = SplitTree::new(1, area());
    let first = tree.focused_id();
    let second = tree.split(SplitOrientation::Horizontal);
    assert_eq!(tree.focused_id(), second);

    assert!(tree.close_window(second));
    assert_eq!(tree.focused_id(), first);
    assert!(tree.focused_window().focused);
}

#[test]
fn focus_next_cycles_leaves() {
    let mut tree = SplitTree::new(1, area());
    let w1 = tree.focused_id();
    let w2 = tree.split(SplitOrientation::Horizontal);
    tree.set_focus(w1);
    tree.focus_next();
    assert_eq!(tree.focused_id(), w2);
    tree.focus_next();
    assert_eq!(tree.focused_id(), w1);
}

// ============================================================
// Scrolling
// ============================================================

#[test]
fn ensure_cursor_visible_scrolls_down_with_margin() {
    let mut window = Window::new(1, 1, Rect::new(0, 0, 10, 80));
    window.ensure_cursor_visible(Position::new(20, 0), 100, 2, 5);
    // Cursor line 20 must sit at least 2 lines above the bottom edge
    assert_eq!(window.scroll_line, 13);
}

#[test]
fn ensure_cursor_visible_scrolls_up() {
    let mut window = Window::new(1, 1, Rect::new(0, 0, 10, 80));
    window.scroll_line = 30;
    window.ensure_cursor_visible(Position::new(12, 0), 100, 2, 5);
    assert_eq!(window.scroll_line, 12);
}

#[test]
fn ensure_cursor_visible_stops_at_buffer_end() {
    let mut window = Window::new(1, 1, Rect::new(0, 0, 10, 80));
    window.ensure_cursor_visible(Position::new(49, 0), 50, 2, 5);
    assert_eq!(window.scroll_line, 40);
}

#[test]
fn ensure_cursor_visible_scrolls_right_with_margin() {
    let mut window = Window::new(1, 1, Rect::new(0, 0, 10, 40));
    window.ensure_cursor_visible(Position::new(0, 60), 100, 2, 5);
    assert_eq!(window.scroll_col, 26);
    window.ensure_cursor_visible(Position::new(0, 10), 100, 2, 5);
    assert_eq!(window.scroll_col, 10);
}

#[test]
fn cursor_inside_viewport_leaves_scroll_alone() {
    let mut window = Window::new(1, 1, Rect::new(0, 0, 10, 80));
    window.ensure_cursor_visible(Position::new(3, 3), 100, 2, 5);
    assert_eq!(window.scroll_line, 0);
    assert_eq!(window.scroll_col, 0);
}

#[test]
fn visible_range_clamps_to_buffer() {
    let mut window = Window::new(1, 1, Rect::new(0, 0, 10, 80));
    window.scroll_line = 5;
    assert_eq!(window.visible_range(8), (5, 8));
    assert_eq!(window.visible_range(100), (5, 15));
}

#[test]
fn scroll_adjustments() {
    let mut window = Window::new(1, 1, Rect::new(0, 0, 10, 80));
    window.scroll_center(20);
    assert_eq!(window.scroll_line, 15);
    window.scroll_top(20);
    assert_eq!(window.scroll_line, 20);
    window.scroll_bottom(20);
    assert_eq!(window.scroll_line, 11);
}

// ============================================================
// Tabs
// ============================================================

#[test]
fn new_tab_is_seeded_with_one_window() {
    let mut tabs = TabSet::new(1, area());
    tabs.new_tab(2);
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs.active_index(), 1);
    assert_eq!(tabs.active().windows().len(), 1);
    assert_eq!(tabs.active().active_window().buffer, 2);
}

#[test]
fn tab_cycling_wraps() {
    let mut tabs = TabSet::new(1, area());
    tabs.new_tab(2);
    tabs.new_tab(3);
    assert_eq!(tabs.active_index(), 2);
    tabs.next_tab();
    assert_eq!(tabs.active_index(), 0);
    tabs.prev_tab();
    assert_eq!(tabs.active_index(), 2);
}

#[test]
fn closing_last_tab_is_rejected() {
    let mut tabs = TabSet::new(1, area());
    assert!(!tabs.close_active());
    tabs.new_tab(2);
    assert!(tabs.close_active());
    assert_eq!(tabs.len(), 1);
}

#[test]
fn closing_last_window_in_tab_is_rejected() {
    let mut tabs = TabSet::new(1, area());
    let only = tabs.active().active_window().id;
    assert!(!tabs.active_mut().close_window(only));
}
