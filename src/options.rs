//! Global editor options
//!
//! The typed backing store for the `:set` option table. Options are only
//! mutated through the settings registry, which parses and validates values
//! before any field is touched.

/// Typed editor options with their defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Show absolute line numbers
    pub number: bool,
    /// Show line numbers relative to the cursor line
    pub relativenumber: bool,
    /// Display width of a tab character
    pub tabstop: usize,
    /// Indent width used by the indent/outdent operators
    pub shiftwidth: usize,
    /// Insert spaces instead of a tab character
    pub expandtab: bool,
    /// Case-insensitive search and substitute
    pub ignorecase: bool,
    /// Minimum lines kept between the cursor and the viewport bottom
    pub scrolloff: usize,
    /// Minimum columns kept between the cursor and the viewport right edge
    pub sidescrolloff: usize,
    /// Milliseconds to wait on an ambiguous key sequence
    pub timeoutlen: usize,
    /// Highlight search matches
    pub hlsearch: bool,
    /// Searches wrap around the end of the buffer
    pub wrapscan: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            number: true,
            relativenumber: false,
            tabstop: 8,
            shiftwidth: 4,
            expandtab: true,
            ignorecase: false,
            scrolloff: 2,
            sidescrolloff: 5,
            timeoutlen: 1000,
            hlsearch: true,
            wrapscan: true,
        }
    }
}

impl Options {
    /// One level of indentation as text, honoring `expandtab`/`shiftwidth`
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.expandtab {
            " ".repeat(self.shiftwidth)
        } else {
            "\t".to_string()
        }
    }
}
