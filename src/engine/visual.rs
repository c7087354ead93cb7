//! Visual mode
//!
//! Motions extend the selection; operators act on the normalized span
//! (min/max of anchor and cursor) and drop back to Normal mode, or to
//! Insert for a change.

use crate::buffer::{Position, SelectionKind};
use crate::key::Key;
use crate::mode::{Mode, VisualKind};
use crate::registers::{RegisterKind, RegisterValue};
use crate::session::EditorSession;

use super::{normal, resolve_motion, Operator};

pub fn handle_key(session: &mut EditorSession, key: Key) -> bool {
    let Mode::Visual(kind) = session.mode else {
        return false;
    };

    // A pending register prefix captures the next key outright, before
    // any operator interpretation
    if session.engine.pending.prefix == Some(super::PendingPrefix::Register) {
        session.engine.pending.prefix = None;
        if let Key::Char(c) = key {
            session.engine.pending.register = Some(c);
        }
        return true;
    }

    match key {
        Key::Escape | Key::Ctrl('c') => {
            session.leave_visual();
            true
        }

        // Toggling the same kind leaves visual mode; another kind switches
        Key::Char('v') => {
            toggle_kind(session, kind, VisualKind::Charwise);
            true
        }
        Key::Char('V') => {
            toggle_kind(session, kind, VisualKind::Linewise);
            true
        }
        Key::Ctrl('v') => {
            toggle_kind(session, kind, VisualKind::Blockwise);
            true
        }

        Key::Char(c @ '1'..='9') => {
            session
                .engine
                .pending
                .push_count_digit(c as usize - '0' as usize);
            true
        }
        Key::Char('0') if session.engine.pending.count.is_some() => {
            session.engine.pending.push_count_digit(0);
            true
        }
        Key::Char('"') => {
            session.engine.pending.prefix = Some(super::PendingPrefix::Register);
            true
        }

        // Anchor swap
        Key::Char('o') => {
            if let Some(mut sel) = session.active_buffer().selection() {
                std::mem::swap(&mut sel.start, &mut sel.end);
                let cursor_target = sel.end;
                let buf = session.active_buffer_mut();
                buf.set_selection(Some(sel));
                buf.set_cursor(cursor_target.row, cursor_target.col);
            }
            true
        }

        Key::Char('d') | Key::Char('x') => {
            apply_visual_operator(session, Operator::Delete, kind);
            true
        }
        Key::Char('y') => {
            apply_visual_operator(session, Operator::Yank, kind);
            true
        }
        Key::Char('c') | Key::Char('s') => {
            apply_visual_operator(session, Operator::Change, kind);
            true
        }
        Key::Char('>') => {
            apply_visual_operator(session, Operator::Indent, kind);
            true
        }
        Key::Char('<') => {
            apply_visual_operator(session, Operator::Outdent, kind);
            true
        }
        Key::Char('=') => {
            apply_visual_operator(session, Operator::Reformat, kind);
            true
        }

        _ => extend_with_motion(session, key),
    }
}

fn toggle_kind(session: &mut EditorSession, current: VisualKind, requested: VisualKind) {
    if current == requested {
        session.leave_visual();
        return;
    }
    session.mode = Mode::Visual(requested);
    if let Some(mut sel) = session.active_buffer().selection() {
        sel.kind = selection_kind(requested);
        session.active_buffer_mut().set_selection(Some(sel));
    }
}

fn selection_kind(kind: VisualKind) -> SelectionKind {
    match kind {
        VisualKind::Charwise => SelectionKind::Charwise,
        VisualKind::Linewise => SelectionKind::Linewise,
        VisualKind::Blockwise => SelectionKind::Blockwise,
    }
}

fn extend_with_motion(session: &mut EditorSession, key: Key) -> bool {
    let count = session.engine.pending.total_count();
    let explicit = session.engine.pending.count.is_some();
    let g_prefix = session.engine.pending.prefix == Some(super::PendingPrefix::G);
    if g_prefix {
        session.engine.pending.prefix = None;
    } else if key == Key::Char('g') {
        session.engine.pending.prefix = Some(super::PendingPrefix::G);
        return true;
    }

    let Some(target) = resolve_motion(session, g_prefix, key, count, explicit) else {
        session.engine.pending.count = None;
        return false;
    };

    let pos = target.pos;
    session.active_buffer_mut().set_cursor(pos.row, pos.col);
    session.clamp_cursor_column();
    let cursor = session.active_buffer().cursor();
    if let Some(mut sel) = session.active_buffer().selection() {
        sel.end = cursor;
        session.active_buffer_mut().set_selection(Some(sel));
    }
    session.engine.pending.count = None;
    true
}

fn apply_visual_operator(session: &mut EditorSession, op: Operator, kind: VisualKind) {
    let register = session.engine.pending.register.take();
    let Some(selection) = session.active_buffer().selection() else {
        session.leave_visual();
        return;
    };
    let (start, end) = selection.ordered();

    match kind {
        VisualKind::Linewise => {
            session.active_buffer_mut().set_selection(None);
            session.mode = Mode::Normal;
            normal::run_line_operator(session, op, register, start.row, end.row);
        }
        VisualKind::Charwise => {
            // The selection includes the character under the cursor
            let end = Position::new(end.row, end.col + 1);
            session.active_buffer_mut().set_selection(None);
            session.mode = Mode::Normal;
            match op {
                Operator::Delete | Operator::Change => {
                    session.active_buffer_mut().begin_undo_group();
                    let removed = session.active_buffer_mut().delete_range(start, end);
                    if !removed.is_empty() {
                        session.registers.record_delete(
                            register,
                            RegisterValue::new(removed, RegisterKind::Charwise),
                        );
                    }
                    if op == Operator::Change {
                        session.enter_insert();
                    } else {
                        session.active_buffer_mut().end_undo_group();
                        session.clamp_cursor_column();
                    }
                }
                Operator::Yank => {
                    let text = session.active_buffer().get_range(start, end);
                    session
                        .registers
                        .record_yank(register, RegisterValue::new(text, RegisterKind::Charwise));
                    session.active_buffer_mut().set_cursor(start.row, start.col);
                    session.clamp_cursor_column();
                }
                Operator::Indent | Operator::Outdent | Operator::Reformat => {
                    normal::run_line_operator(session, op, register, start.row, end.row);
                }
            }
        }
        VisualKind::Blockwise => {
            apply_block_operator(session, op, register, start, end);
        }
    }

    session.engine.pending.reset();
}

/// Operators over the normalized rectangle of a blockwise selection
fn apply_block_operator(
    session: &mut EditorSession,
    op: Operator,
    register: Option<char>,
    start: Position,
    end: Position,
) {
    let left = start.col.min(end.col);
    let right = start.col.max(end.col) + 1;
    let (top, bottom) = (start.row.min(end.row), start.row.max(end.row));

    session.active_buffer_mut().set_selection(None);
    session.mode = Mode::Normal;

    match op {
        Operator::Delete | Operator::Change => {
            session.active_buffer_mut().begin_undo_group();
            let mut removed = Vec::new();
            for row in top..=bottom {
                let line_len = session.active_buffer().line_len(row);
                let from = left.min(line_len);
                let to = right.min(line_len);
                removed.push(session.active_buffer_mut().delete_range(
                    Position::new(row, from),
                    Position::new(row, to),
                ));
            }
            session.registers.record_delete(
                register,
                RegisterValue::new(removed.join("\n"), RegisterKind::Blockwise),
            );
            session.active_buffer_mut().set_cursor(top, left);
            if op == Operator::Change {
                session.enter_insert();
            } else {
                session.active_buffer_mut().end_undo_group();
                session.clamp_cursor_column();
            }
        }
        Operator::Yank => {
            let mut taken = Vec::new();
            for row in top..=bottom {
                let line_len = session.active_buffer().line_len(row);
                let from = left.min(line_len);
                let to = right.min(line_len);
                taken.push(session.active_buffer().get_range(
                    Position::new(row, from),
                    Position::new(row, to),
                ));
            }
            session.registers.record_yank(
                register,
                RegisterValue::new(taken.join("\n"), RegisterKind::Blockwise),
            );
            session.active_buffer_mut().set_cursor(top, left);
            session.clamp_cursor_column();
        }
        Operator::Indent | Operator::Outdent | Operator::Reformat => {
            normal::run_line_operator(session, op, register, top, bottom);
        }
    }
}
