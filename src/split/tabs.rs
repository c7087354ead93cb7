//! Tabs: ordered window sets over split trees

use crate::buffer::BufferId;

use super::tree::{SplitOrientation, SplitTree};
use super::window::{Rect, Window, WindowId};

/// One tab page: a split tree with a focused window
#[derive(Debug)]
pub struct Tab {
    pub tree: SplitTree,
}

impl Tab {
    /// A new tab is always seeded with exactly one window
    #[must_use]
    pub fn new(buffer: BufferId, area: Rect) -> Self {
        Tab {
            tree: SplitTree::new(buffer, area),
        }
    }

    #[must_use]
    pub fn windows(&self) -> Vec<WindowId> {
        self.tree.leaf_order()
    }

    #[must_use]
    pub fn active_window(&self) -> &Window {
        self.tree.focused_window()
    }

    pub fn active_window_mut(&mut self) -> &mut Window {
        self.tree.focused_window_mut()
    }

    /// Close a window; rejected when it is the tab's last one
    pub fn close_window(&mut self, id: WindowId) -> bool {
        self.tree.close_window(id)
    }

    pub fn split(&mut self, orientation: SplitOrientation) -> WindowId {
        self.tree.split(orientation)
    }
}

/// The ordered tab pages with one active tab
#[derive(Debug)]
pub struct TabSet {
    tabs: Vec<Tab>,
    active: usize,
    area: Rect,
}

impl TabSet {
    #[must_use]
    pub fn new(buffer: BufferId, area: Rect) -> Self {
        TabSet {
            tabs: vec![Tab::new(buffer, area)],
            active: 0,
            area,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false // a tab set always holds at least one tab
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// Open a new tab seeded with one window on `buffer`, after the active
    /// tab, and switch to it
    pub fn new_tab(&mut self, buffer: BufferId) {
        let tab = Tab::new(buffer, self.area);
        self.tabs.insert(self.active + 1, tab);
        self.active += 1;
    }

    /// Close the active tab; rejected when it is the last one
    pub fn close_active(&mut self) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        self.tabs.remove(self.active);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }
        true
    }

    pub fn next_tab(&mut self) {
        self.active = (self.active + 1) % self.tabs.len();
    }

    pub fn prev_tab(&mut self) {
        self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
    }

    /// Propagate a terminal resize to every tab's tree
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        for tab in &mut self.tabs {
            tab.tree.resize(area);
        }
    }
}
