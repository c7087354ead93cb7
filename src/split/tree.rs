//! Binary split tree
//!
//! ## split/ Invariants
//!
//! - The tree is strictly binary: a node has exactly zero or two children.
//! - Only leaves hold a buffer view; interior nodes are layout-only.
//! - There is always at least one window; closing the last one is
//!   rejected.
//! - Closing a window merges its sibling upward and contracts the tree by
//!   one level.

use std::collections::HashMap;

use crate::buffer::BufferId;

use super::window::{Rect, Window, WindowId};

/// Split orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOrientation {
    /// Children stacked vertically (`:split`)
    Horizontal,
    /// Children side by side (`:vsplit`)
    Vertical,
}

/// A node of the layout tree
#[derive(Debug, Clone)]
pub enum SplitNode {
    Leaf(WindowId),
    Split {
        orientation: SplitOrientation,
        ratio: f64,
        first: Box<SplitNode>,
        second: Box<SplitNode>,
    },
}

/// The split tree of one tab: layout plus the window table
#[derive(Debug)]
pub struct SplitTree {
    root: SplitNode,
    windows: HashMap<WindowId, Window>,
    focused: WindowId,
    next_window_id: WindowId,
    area: Rect,
}

impl SplitTree {
    /// A tree with a single window covering `area`
    #[must_use]
    pub fn new(buffer: BufferId, area: Rect) -> Self {
        let id = 1;
        let mut window = Window::new(id, buffer, area);
        window.focused = true;
        let mut windows = HashMap::new();
        windows.insert(id, window);
        SplitTree {
            root: SplitNode::Leaf(id),
            windows,
            focused: id,
            next_window_id: 2,
            area,
        }
    }

    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn focused_id(&self) -> WindowId {
        self.focused
    }

    #[must_use]
    pub fn focused_window(&self) -> &Window {
        &self.windows[&self.focused]
    }

    pub fn focused_window_mut(&mut self) -> &mut Window {
        self.windows.get_mut(&self.focused).expect("focused window exists")
    }

    #[must_use]
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    /// Leaf windows in tree order (the tab's ordered window list)
    #[must_use]
    pub fn leaf_order(&self) -> Vec<WindowId> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut out);
        out
    }

    pub fn set_focus(&mut self, id: WindowId) -> bool {
        if !self.windows.contains_key(&id) {
            return false;
        }
        if let Some(old) = self.windows.get_mut(&self.focused) {
            old.focused = false;
        }
        self.focused = id;
        self.windows.get_mut(&id).expect("window exists").focused = true;
        true
    }

    /// Cycle focus to the next leaf in tree order
    pub fn focus_next(&mut self) {
        let order = self.leaf_order();
        if let Some(idx) = order.iter().position(|&id| id == self.focused) {
            let next = order[(idx + 1) % order.len()];
            self.set_focus(next);
        }
    }

    /// Split the focused window, creating exactly two children. The new
    /// window views the same buffer and takes focus. Returns its id.
    pub fn split(&mut self, orientation: SplitOrientation) -> WindowId {
        let target = self.focused;
        let buffer = self.windows[&target].buffer;
        let new_id = self.next_window_id;
        self.next_window_id += 1;

        let mut window = Window::new(new_id, buffer, Rect::default());
        window.scroll_line = self.windows[&target].scroll_line;
        self.windows.insert(new_id, window);

        let root = std::mem::replace(&mut self.root, SplitNode::Leaf(0));
        self.root = replace_leaf(root, target, orientation, new_id);
        self.relayout();
        self.set_focus(new_id);
        new_id
    }

    /// Close a window: the sibling absorbs the freed space and the split
    /// node collapses. Rejected (false) for the last window.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        if self.windows.len() <= 1 || !self.windows.contains_key(&id) {
            return false;
        }

        if let Some(window) = self.windows.get_mut(&id) {
            window.valid = false;
        }
        self.windows.remove(&id);
        let root = std::mem::replace(&mut self.root, SplitNode::Leaf(0));
        self.root = remove_leaf(root, id);
        self.relayout();

        if self.focused == id {
            let fallback = self.leaf_order()[0];
            self.set_focus(fallback);
        }
        true
    }

    /// Recompute window geometry for a new total area
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.relayout();
    }

    fn relayout(&mut self) {
        let area = self.area;
        layout_node(&self.root, area, &mut self.windows);
    }
}

fn collect_leaves(node: &SplitNode, out: &mut Vec<WindowId>) {
    match node {
        SplitNode::Leaf(id) => out.push(*id),
        SplitNode::Split { first, second, .. } => {
            collect_leaves(first, out);
            collect_leaves(second, out);
        }
    }
}

fn replace_leaf(
    node: SplitNode,
    target: WindowId,
    orientation: SplitOrientation,
    new_id: WindowId,
) -> SplitNode {
    match node {
        SplitNode::Leaf(id) if id == target => SplitNode::Split {
            orientation,
            ratio: 0.5,
            first: Box::new(SplitNode::Leaf(id)),
            second: Box::new(SplitNode::Leaf(new_id)),
        },
        SplitNode::Split {
            orientation: o,
            ratio,
            first,
            second,
        } => SplitNode::Split {
            orientation: o,
            ratio,
            first: Box::new(replace_leaf(*first, target, orientation, new_id)),
            second: Box::new(replace_leaf(*second, target, orientation, new_id)),
        },
        other => other,
    }
}

fn remove_leaf(node: SplitNode, target: WindowId) -> SplitNode {
    match node {
        SplitNode::Split {
            orientation,
            ratio,
            first,
            second,
        } => {
            if matches!(&*first, SplitNode::Leaf(id) if *id == target) {
                return *second;
            }
            if matches!(&*second, SplitNode::Leaf(id) if *id == target) {
                return *first;
            }
            SplitNode::Split {
                orientation,
                ratio,
                first: Box::new(remove_leaf(*first, target)),
                second: Box::new(remove_leaf(*second, target)),
            }
        }
        other => other,
    }
}

/// Geometry propagation: the first child receives `floor(extent * ratio)`,
/// the second the remainder.
fn layout_node(node: &SplitNode, area: Rect, windows: &mut HashMap<WindowId, Window>) {
    match node {
        SplitNode::Leaf(id) => {
            if let Some(window) = windows.get_mut(id) {
                window.rect = area;
            }
        }
        SplitNode::Split {
            orientation,
            ratio,
            first,
            second,
        } => match orientation {
            SplitOrientation::Horizontal => {
                let first_height = (area.height as f64 * ratio).floor() as usize;
                let second_height = area.height - first_height;
                layout_node(
                    first,
                    Rect::new(area.row, area.col, first_height, area.width),
                    windows,
                );
                layout_node(
                    second,
                    Rect::new(area.row + first_height, area.col, second_height, area.width),
                    windows,
                );
            }
            SplitOrientation::Vertical => {
                let first_width = (area.width as f64 * ratio).floor() as usize;
                let second_width = area.width - first_width;
                layout_node(
                    first,
                    Rect::new(area.row, area.col, area.height, first_width),
                    windows,
                );
                layout_node(
                    second,
                    Rect::new(area.row, area.col + first_width, area.height, second_width),
                    windows,
                );
            }
        },
    }
}
