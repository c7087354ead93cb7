//! Window and tab layout
//!
//! A tab owns a binary split tree of windows; every leaf is a viewport
//! onto a buffer. Layout geometry is recomputed top-down whenever the tree
//! or the terminal area changes.

pub mod tabs;
pub mod tree;
pub mod window;

pub use tabs::{Tab, TabSet};
pub use tree::{SplitNode, SplitOrientation, SplitTree};
pub use window::{Rect, Window, WindowId};

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
