//! Window: a viewport onto a buffer

use crate::buffer::{BufferId, Position};

/// Unique window identity within a tab
pub type WindowId = u64;

/// Screen-cell rectangle (0-indexed origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

impl Rect {
    #[must_use]
    pub fn new(row: usize, col: usize, height: usize, width: usize) -> Self {
        Rect {
            row,
            col,
            height,
            width,
        }
    }
}

/// A leaf viewport in the split tree
///
/// Windows hold a shared buffer reference by id, never ownership; several
/// windows may display the same buffer.
#[derive(Debug, Clone)]
pub struct Window {
    pub id: WindowId,
    pub buffer: BufferId,
    pub rect: Rect,
    /// First visible buffer line
    pub scroll_line: usize,
    /// First visible column
    pub scroll_col: usize,
    pub focused: bool,
    /// False once the window has been closed
    pub valid: bool,
}

impl Window {
    #[must_use]
    pub fn new(id: WindowId, buffer: BufferId, rect: Rect) -> Self {
        Window {
            id,
            buffer,
            rect,
            scroll_line: 0,
            scroll_col: 0,
            focused: false,
            valid: true,
        }
    }

    /// Adjust scroll so the cursor stays inside the viewport, keeping
    /// `scrolloff` lines of bottom margin and `sidescrolloff` columns of
    /// right margin where the buffer allows it. Never scrolls past the
    /// end of the buffer.
    pub fn ensure_cursor_visible(
        &mut self,
        cursor: Position,
        line_count: usize,
        scrolloff: usize,
        sidescrolloff: usize,
    ) {
        if self.rect.height > 0 {
            let margin = scrolloff.min(self.rect.height.saturating_sub(1) / 2);
            let last_visible = self.scroll_line + self.rect.height - 1;
            if cursor.row < self.scroll_line {
                self.scroll_line = cursor.row;
            } else if cursor.row + margin > last_visible {
                self.scroll_line = (cursor.row + margin + 1).saturating_sub(self.rect.height);
            }
            self.scroll_line = self
                .scroll_line
                .min(line_count.saturating_sub(self.rect.height));
        }

        if self.rect.width > 0 {
            let margin = sidescrolloff.min(self.rect.width.saturating_sub(1) / 2);
            let last_visible = self.scroll_col + self.rect.width - 1;
            if cursor.col < self.scroll_col {
                self.scroll_col = cursor.col;
            } else if cursor.col + margin > last_visible {
                self.scroll_col = (cursor.col + margin + 1).saturating_sub(self.rect.width);
            }
        }
    }

    /// Line range currently visible, end-exclusive and clamped to the
    /// buffer length
    #[must_use]
    pub fn visible_range(&self, line_count: usize) -> (usize, usize) {
        let start = self.scroll_line.min(line_count.saturating_sub(1));
        let end = (start + self.rect.height).min(line_count);
        (start, end)
    }

    /// Scroll so `line` sits centered / at the top / at the bottom of the
    /// viewport (the zz / zt / zb adjustments)
    pub fn scroll_center(&mut self, line: usize) {
        self.scroll_line = line.saturating_sub(self.rect.height / 2);
    }

    pub fn scroll_top(&mut self, line: usize) {
        self.scroll_line = line;
    }

    pub fn scroll_bottom(&mut self, line: usize) {
        self.scroll_line = (line + 1).saturating_sub(self.rect.height);
    }
}
