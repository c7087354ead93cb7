//! Mode engine
//!
//! ## engine/ Invariants
//!
//! - Handlers interpret canonical keys against the active buffer/window
//!   and return whether the key was handled; unrecognized keys are never
//!   errors.
//! - Transient parse state (count, register, operator) is reset on every
//!   committed action and on explicit cancel.
//! - An operator plus a motion produces an end-exclusive range; counts on
//!   the operator and the motion multiply.
//! - Handlers mutate the session directly and return structured outcomes;
//!   there is no string-keyed event dispatch.

pub mod command;
pub mod insert;
pub mod normal;
pub mod visual;

use crate::buffer::Position;
use crate::key::Key;
use crate::mode::Mode;
use crate::movement;
use crate::session::EditorSession;

/// An operator awaiting a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Yank,
    Change,
    Indent,
    Outdent,
    Reformat,
}

impl Operator {
    /// The key that doubles into the linewise form (`dd`, `yy`, ...)
    #[must_use]
    pub fn key(&self) -> char {
        match self {
            Operator::Delete => 'd',
            Operator::Yank => 'y',
            Operator::Change => 'c',
            Operator::Indent => '>',
            Operator::Outdent => '<',
            Operator::Reformat => '=',
        }
    }
}

/// Two-key dispatch prefixes and pending one-shot arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPrefix {
    /// `g` dispatch (gg, ge, gt, gT)
    G,
    /// `z` dispatch (zz, zt, zb)
    Z,
    /// `<C-w>` window dispatch
    Window,
    /// `"` awaiting a register name
    Register,
    /// `m` awaiting a mark name
    SetMark,
    /// `` ` `` or `'` awaiting a mark name
    JumpMark,
    /// `r` awaiting the replacement character
    ReplaceChar,
}

/// Transient operator-grammar state, reset on every committed action
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingInput {
    /// Count typed before the operator or motion
    pub count: Option<usize>,
    /// Count typed before the operator when one is pending
    pub operator_count: Option<usize>,
    /// Register selected with `"`
    pub register: Option<char>,
    /// Operator awaiting its motion
    pub operator: Option<Operator>,
    /// Active two-key prefix
    pub prefix: Option<PendingPrefix>,
}

impl PendingInput {
    /// Whether an operator is awaiting a motion
    #[must_use]
    pub fn operator_pending(&self) -> bool {
        self.operator.is_some()
    }

    /// Effective count: operator and motion counts multiply, absent counts
    /// default to one
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.count.unwrap_or(1) * self.operator_count.unwrap_or(1)
    }

    pub fn push_count_digit(&mut self, digit: usize) {
        self.count = Some(self.count.unwrap_or(0) * 10 + digit);
    }

    pub fn reset(&mut self) {
        *self = PendingInput::default();
    }
}

/// Command-line prompt discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdlinePrompt {
    /// `:` ex command
    Ex,
    /// `/` forward search
    SearchForward,
    /// `?` backward search
    SearchBackward,
}

impl CmdlinePrompt {
    #[must_use]
    pub fn symbol(&self) -> char {
        match self {
            CmdlinePrompt::Ex => ':',
            CmdlinePrompt::SearchForward => '/',
            CmdlinePrompt::SearchBackward => '?',
        }
    }
}

/// Command-line editing state
#[derive(Debug, Clone)]
pub struct CmdlineState {
    pub prompt: CmdlinePrompt,
    pub text: String,
}

impl CmdlineState {
    #[must_use]
    pub fn new(prompt: CmdlinePrompt) -> Self {
        CmdlineState {
            prompt,
            text: String::new(),
        }
    }
}

/// Engine-owned state living across keystrokes
#[derive(Debug, Default)]
pub struct EngineState {
    pub pending: PendingInput,
    pub cmdline: Option<CmdlineState>,
    /// Last `/`/`?` pattern and direction, for `n`/`N`
    pub last_search: Option<(String, bool)>,
}

/// Interpret one canonical key against the session's active mode.
/// Returns whether the key was handled.
pub fn handle_key(session: &mut EditorSession, key: Key) -> bool {
    match session.mode {
        Mode::Normal => normal::handle_key(session, key),
        Mode::Insert | Mode::Replace => insert::handle_key(session, key),
        Mode::Visual(_) => visual::handle_key(session, key),
        Mode::Command => command::handle_key(session, key),
    }
}

// ============================================================
// Motion resolution (shared by Normal, Visual, operator-pending)
// ============================================================

/// How a motion's destination closes its operator range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// The destination character is excluded from the range
    Exclusive,
    /// The destination character is included in the range
    Inclusive,
    /// The operator acts on whole lines
    Linewise,
}

/// A resolved motion destination
#[derive(Debug, Clone, Copy)]
pub struct MotionTarget {
    pub pos: Position,
    pub kind: MotionKind,
}

fn target(pos: Position, kind: MotionKind) -> Option<MotionTarget> {
    Some(MotionTarget { pos, kind })
}

/// Resolve a motion key (optionally behind a `g` prefix) to a destination.
/// `None` means the key is not a motion.
pub fn resolve_motion(
    session: &EditorSession,
    g_prefix: bool,
    key: Key,
    count: usize,
    explicit_count: bool,
) -> Option<MotionTarget> {
    let buf = session.active_buffer();
    let cursor = buf.cursor();
    let count = count.max(1);

    if g_prefix {
        return match key {
            // gg: first line, or the counted line with an explicit count
            Key::Char('g') => {
                let row = if explicit_count {
                    (count - 1).min(buf.line_count() - 1)
                } else {
                    0
                };
                let col = movement::first_non_blank(buf.line(row).unwrap_or(""));
                target(Position::new(row, col), MotionKind::Linewise)
            }
            Key::Char('e') => target(
                movement::word_end_backward(buf, cursor, count),
                MotionKind::Inclusive,
            ),
            _ => None,
        };
    }

    match key {
        Key::Char('h') | Key::Left | Key::Backspace => target(
            Position::new(cursor.row, cursor.col.saturating_sub(count)),
            MotionKind::Exclusive,
        ),
        Key::Char('l') | Key::Right => {
            let len = buf.line_len(cursor.row);
            target(
                Position::new(cursor.row, (cursor.col + count).min(len)),
                MotionKind::Exclusive,
            )
        }
        Key::Char('j') | Key::Down => target(
            Position::new(
                (cursor.row + count).min(buf.line_count() - 1),
                cursor.col,
            ),
            MotionKind::Linewise,
        ),
        Key::Char('k') | Key::Up => target(
            Position::new(cursor.row.saturating_sub(count), cursor.col),
            MotionKind::Linewise,
        ),
        Key::Char('0') | Key::Home => target(Position::new(cursor.row, 0), MotionKind::Exclusive),
        Key::Char('^') => {
            let col = movement::first_non_blank(buf.line(cursor.row).unwrap_or(""));
            target(Position::new(cursor.row, col), MotionKind::Exclusive)
        }
        Key::Char('$') | Key::End => {
            // Past the last character so an operator reaches the line end
            let row = (cursor.row + count - 1).min(buf.line_count() - 1);
            target(
                Position::new(row, buf.line_len(row)),
                MotionKind::Exclusive,
            )
        }
        Key::Char('w') => target(
            movement::word_forward(buf, cursor, count),
            MotionKind::Exclusive,
        ),
        Key::Char('b') => target(
            movement::word_backward(buf, cursor, count),
            MotionKind::Exclusive,
        ),
        Key::Char('e') => target(
            movement::word_end_forward(buf, cursor, count),
            MotionKind::Inclusive,
        ),
        Key::Char('G') => {
            let row = if explicit_count {
                (count - 1).min(buf.line_count() - 1)
            } else {
                buf.line_count() - 1
            };
            let col = movement::first_non_blank(buf.line(row).unwrap_or(""));
            target(Position::new(row, col), MotionKind::Linewise)
        }
        Key::Char('%') => movement::match_bracket(buf, cursor)
            .and_then(|pos| target(pos, MotionKind::Inclusive)),
        _ => None,
    }
}
