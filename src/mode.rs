//! Editor mode definitions

/// Granularity of a visual selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    /// Arbitrary character range
    Charwise,
    /// Whole lines
    Linewise,
    /// Rectangular column block
    Blockwise,
}

/// Editor operating mode
///
/// The mode is a tagged value; code must match on it, never on a
/// stringified form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal mode (motions, operators, mode entries)
    Normal,
    /// Insert mode (text editing)
    Insert,
    /// Visual mode with a selection granularity
    Visual(VisualKind),
    /// Command mode (ex command line, entered with :)
    Command,
    /// Replace mode (overtype, entered with R)
    Replace,
}

impl Mode {
    /// Status-line label for the mode
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual(VisualKind::Charwise) => "VISUAL",
            Mode::Visual(VisualKind::Linewise) => "V-LINE",
            Mode::Visual(VisualKind::Blockwise) => "V-BLOCK",
            Mode::Command => "COMMAND",
            Mode::Replace => "REPLACE",
        }
    }

    /// Whether this is any of the visual modes
    #[must_use]
    pub fn is_visual(&self) -> bool {
        matches!(self, Mode::Visual(_))
    }
}
