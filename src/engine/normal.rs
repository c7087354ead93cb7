//! Normal mode
//!
//! Interprets counts, registers, operators, motions, and the two-key
//! dispatch prefixes. An unrecognized key after an operator silently
//! aborts the pending operator; no error is signaled.

use crate::buffer::Position;
use crate::key::Key;
use crate::mode::VisualKind;
use crate::movement;
use crate::registers::{RegisterKind, RegisterValue};
use crate::session::EditorSession;
use crate::split::SplitOrientation;

use super::{
    resolve_motion, CmdlinePrompt, MotionKind, MotionTarget, Operator, PendingPrefix,
};

pub fn handle_key(session: &mut EditorSession, key: Key) -> bool {
    if let Some(prefix) = session.engine.pending.prefix {
        session.engine.pending.prefix = None;
        return handle_prefixed(session, prefix, key);
    }

    match key {
        Key::Escape | Key::Ctrl('c') => {
            session.engine.pending.reset();
            session.clear_status();
            true
        }

        // Counts: a leading zero is the line-start motion instead
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
            session.engine.pending.prefix = Some(PendingPrefix::Register);
            true
        }
        Key::Char('g') => {
            session.engine.pending.prefix = Some(PendingPrefix::G);
            true
        }
        Key::Char('z') if !session.engine.pending.operator_pending() => {
            session.engine.pending.prefix = Some(PendingPrefix::Z);
            true
        }
        Key::Ctrl('w') if !session.engine.pending.operator_pending() => {
            session.engine.pending.prefix = Some(PendingPrefix::Window);
            true
        }
        Key::Char('m') if !session.engine.pending.operator_pending() => {
            session.engine.pending.prefix = Some(PendingPrefix::SetMark);
            true
        }
        Key::Char('`') | Key::Char('\'') if !session.engine.pending.operator_pending() => {
            session.engine.pending.prefix = Some(PendingPrefix::JumpMark);
            true
        }
        Key::Char('r') if !session.engine.pending.operator_pending() => {
            session.engine.pending.prefix = Some(PendingPrefix::ReplaceChar);
            true
        }

        // Operators; a repeated operator key is the linewise doubled form
        Key::Char(c) if operator_for(c).is_some() => {
            let Some(op) = operator_for(c) else {
                return true;
            };
            match session.engine.pending.operator {
                None => {
                    session.engine.pending.operator = Some(op);
                    session.engine.pending.operator_count = session.engine.pending.count.take();
                    true
                }
                Some(pending_op) if pending_op == op => {
                    let count = session.engine.pending.total_count();
                    apply_operator_on_lines(session, op, count);
                    true
                }
                Some(_) => {
                    // A different operator aborts the pending one
                    session.engine.pending.reset();
                    true
                }
            }
        }

        _ => handle_motion_or_command(session, key),
    }
}

fn handle_motion_or_command(session: &mut EditorSession, key: Key) -> bool {
    let count = session.engine.pending.total_count();
    let explicit_count = session.engine.pending.count.is_some()
        || session.engine.pending.operator_count.is_some();

    if let Some(target) = resolve_motion(session, false, key, count, explicit_count) {
        apply_motion(session, target);
        return true;
    }

    if session.engine.pending.operator_pending() {
        // Not a motion: the pending operator silently aborts
        session.engine.pending.reset();
        return true;
    }

    match key {
        // Insert-mode entries
        Key::Char('i') => {
            session.enter_insert();
            true
        }
        Key::Char('I') => {
            let col = {
                let buf = session.active_buffer();
                movement::first_non_blank(buf.line(buf.cursor().row).unwrap_or(""))
            };
            let row = session.active_buffer().cursor().row;
            session.active_buffer_mut().set_cursor(row, col);
            session.enter_insert();
            true
        }
        Key::Char('a') => {
            let cursor = session.active_buffer().cursor();
            let len = session.active_buffer().line_len(cursor.row);
            session.enter_insert();
            let col = if len == 0 { 0 } else { cursor.col + 1 };
            session.active_buffer_mut().set_cursor(cursor.row, col);
            true
        }
        Key::Char('A') => {
            let cursor = session.active_buffer().cursor();
            let len = session.active_buffer().line_len(cursor.row);
            session.enter_insert();
            session.active_buffer_mut().set_cursor(cursor.row, len);
            true
        }
        Key::Char('o') => {
            let row = session.active_buffer().cursor().row;
            session.enter_insert();
            let buf = session.active_buffer_mut();
            buf.insert_line(row + 1, "");
            buf.set_cursor(row + 1, 0);
            true
        }
        Key::Char('O') => {
            let row = session.active_buffer().cursor().row;
            session.enter_insert();
            let buf = session.active_buffer_mut();
            buf.insert_line(row, "");
            buf.set_cursor(row, 0);
            true
        }
        Key::Char('R') => {
            session.enter_replace();
            true
        }

        // Visual-mode entries
        Key::Char('v') => {
            session.enter_visual(VisualKind::Charwise);
            true
        }
        Key::Char('V') => {
            session.enter_visual(VisualKind::Linewise);
            true
        }
        Key::Ctrl('v') => {
            session.enter_visual(VisualKind::Blockwise);
            true
        }

        // Command line and search
        Key::Char(':') => {
            session.enter_cmdline(CmdlinePrompt::Ex);
            true
        }
        Key::Char('/') => {
            session.enter_cmdline(CmdlinePrompt::SearchForward);
            true
        }
        Key::Char('?') => {
            session.enter_cmdline(CmdlinePrompt::SearchBackward);
            true
        }
        Key::Char('n') => {
            session.repeat_search(false);
            session.engine.pending.reset();
            true
        }
        Key::Char('N') => {
            session.repeat_search(true);
            session.engine.pending.reset();
            true
        }

        // Single-key edits
        Key::Char('x') | Key::Delete => {
            let register = session.engine.pending.register.take();
            let pos = session.active_buffer().cursor();
            let removed = session.active_buffer_mut().delete(pos, count);
            if !removed.is_empty() {
                session
                    .registers
                    .record_delete(register, RegisterValue::new(removed, RegisterKind::Charwise));
            }
            session.clamp_cursor_column();
            session.engine.pending.reset();
            true
        }
        Key::Char('X') => {
            let register = session.engine.pending.register.take();
            let pos = session.active_buffer().cursor();
            let start = pos.col.saturating_sub(count);
            let removed = session
                .active_buffer_mut()
                .delete(Position::new(pos.row, start), pos.col - start);
            if !removed.is_empty() {
                session
                    .registers
                    .record_delete(register, RegisterValue::new(removed, RegisterKind::Charwise));
            }
            session.active_buffer_mut().set_cursor(pos.row, start);
            session.engine.pending.reset();
            true
        }
        Key::Char('D') => {
            delete_to_line_end(session);
            session.engine.pending.reset();
            true
        }
        Key::Char('C') => {
            session.active_buffer_mut().begin_undo_group();
            delete_to_line_end(session);
            session.enter_insert();
            session.engine.pending.reset();
            true
        }
        Key::Char('s') => {
            let register = session.engine.pending.register.take();
            let pos = session.active_buffer().cursor();
            session.active_buffer_mut().begin_undo_group();
            let removed = session.active_buffer_mut().delete(pos, count);
            if !removed.is_empty() {
                session
                    .registers
                    .record_delete(register, RegisterValue::new(removed, RegisterKind::Charwise));
            }
            session.enter_insert();
            session.engine.pending.reset();
            true
        }
        Key::Char('S') => {
            let row = session.active_buffer().cursor().row;
            session.active_buffer_mut().begin_undo_group();
            let line = session.active_buffer().line(row).unwrap_or("").to_string();
            session
                .registers
                .record_delete(None, RegisterValue::new(format!("{line}\n"), RegisterKind::Linewise));
            session.active_buffer_mut().replace_line(row, "");
            session.active_buffer_mut().set_cursor(row, 0);
            session.enter_insert();
            session.engine.pending.reset();
            true
        }
        Key::Char('J') => {
            join_lines(session, count);
            session.engine.pending.reset();
            true
        }

        // Paste
        Key::Char('p') => {
            paste(session, true);
            session.engine.pending.reset();
            true
        }
        Key::Char('P') => {
            paste(session, false);
            session.engine.pending.reset();
            true
        }

        // History
        Key::Char('u') => {
            let undone = session.active_buffer_mut().undo();
            session.set_status(if undone { "1 change; older" } else { "Already at oldest change" });
            session.engine.pending.reset();
            true
        }
        Key::Ctrl('r') => {
            let redone = session.active_buffer_mut().redo();
            session.set_status(if redone { "1 change; newer" } else { "Already at newest change" });
            session.engine.pending.reset();
            true
        }

        // Half-page scrolls
        Key::Ctrl('d') => {
            half_page(session, true);
            session.engine.pending.reset();
            true
        }
        Key::Ctrl('u') => {
            half_page(session, false);
            session.engine.pending.reset();
            true
        }
        Key::PageDown => {
            let height = session.active_window().rect.height;
            move_cursor_rows(session, height as isize);
            session.engine.pending.reset();
            true
        }
        Key::PageUp => {
            let height = session.active_window().rect.height;
            move_cursor_rows(session, -(height as isize));
            session.engine.pending.reset();
            true
        }

        _ => {
            session.engine.pending.reset();
            false
        }
    }
}

// ============================================================
// Prefixed dispatch
// ============================================================

fn handle_prefixed(session: &mut EditorSession, prefix: PendingPrefix, key: Key) -> bool {
    match prefix {
        PendingPrefix::Register => {
            if let Key::Char(c) = key {
                session.engine.pending.register = Some(c);
            } else {
                session.engine.pending.reset();
            }
            true
        }
        PendingPrefix::G => handle_g_prefix(session, key),
        PendingPrefix::Z => {
            let row = session.active_buffer().cursor().row;
            let window = session.active_window_mut();
            match key {
                Key::Char('z') => window.scroll_center(row),
                Key::Char('t') => window.scroll_top(row),
                Key::Char('b') => window.scroll_bottom(row),
                _ => {}
            }
            session.engine.pending.reset();
            true
        }
        PendingPrefix::Window => {
            match key {
                Key::Char('w') | Key::Ctrl('w') => session.focus_next_window(),
                Key::Char('s') => session.split_window(SplitOrientation::Horizontal),
                Key::Char('v') => session.split_window(SplitOrientation::Vertical),
                Key::Char('c') | Key::Char('q') => {
                    if !session.close_active_window() {
                        session.set_status("Cannot close last window");
                    }
                }
                _ => {}
            }
            session.engine.pending.reset();
            true
        }
        PendingPrefix::SetMark => {
            if let Key::Char(c @ 'a'..='z') = key {
                let pos = session.active_buffer().cursor();
                session.active_buffer_mut().set_mark(c, pos);
            }
            session.engine.pending.reset();
            true
        }
        PendingPrefix::JumpMark => {
            if let Key::Char(c) = key {
                match session.active_buffer().mark(c) {
                    Some(pos) => {
                        session.active_buffer_mut().set_cursor(pos.row, pos.col);
                        session.clamp_cursor_column();
                    }
                    None => session.set_status(&format!("Mark not set: {c}")),
                }
            }
            session.engine.pending.reset();
            true
        }
        PendingPrefix::ReplaceChar => {
            if let Key::Char(c) = key {
                replace_chars(session, c);
            }
            session.engine.pending.reset();
            true
        }
    }
}

fn handle_g_prefix(session: &mut EditorSession, key: Key) -> bool {
    let count = session.engine.pending.total_count();
    let explicit_count = session.engine.pending.count.is_some()
        || session.engine.pending.operator_count.is_some();

    if let Some(target) = resolve_motion(session, true, key, count, explicit_count) {
        apply_motion(session, target);
        return true;
    }

    if session.engine.pending.operator_pending() {
        session.engine.pending.reset();
        return true;
    }

    match key {
        Key::Char('t') => session.tabs.next_tab(),
        Key::Char('T') => session.tabs.prev_tab(),
        _ => {}
    }
    session.engine.pending.reset();
    true
}

// ============================================================
// Motion application
// ============================================================

fn apply_motion(session: &mut EditorSession, target: MotionTarget) {
    if let Some(op) = session.engine.pending.operator {
        apply_operator(session, op, target);
        return;
    }
    let pos = target.pos;
    session.active_buffer_mut().set_cursor(pos.row, pos.col);
    session.clamp_cursor_column();
    session.engine.pending.reset();
}

fn operator_for(c: char) -> Option<Operator> {
    match c {
        'd' => Some(Operator::Delete),
        'y' => Some(Operator::Yank),
        'c' => Some(Operator::Change),
        '>' => Some(Operator::Indent),
        '<' => Some(Operator::Outdent),
        '=' => Some(Operator::Reformat),
        _ => None,
    }
}

/// End-exclusive character range for a motion, ordered
fn motion_range(session: &EditorSession, target: &MotionTarget) -> (Position, Position) {
    let cursor = session.active_buffer().cursor();
    let (start, mut end) = if cursor <= target.pos {
        (cursor, target.pos)
    } else {
        (target.pos, cursor)
    };
    if target.kind == MotionKind::Inclusive {
        end.col += 1;
    }
    (start, end)
}

fn apply_operator(session: &mut EditorSession, op: Operator, target: MotionTarget) {
    let register = session.engine.pending.register.take();

    if target.kind == MotionKind::Linewise {
        let cursor_row = session.active_buffer().cursor().row;
        let start_row = cursor_row.min(target.pos.row);
        let end_row = cursor_row.max(target.pos.row);
        run_line_operator(session, op, register, start_row, end_row);
    } else {
        let (start, end) = motion_range(session, &target);
        run_char_operator(session, op, register, start, end);
    }

    session.engine.pending.reset();
}

/// The doubled forms: `dd`, `yy`, `cc`, `>>`, `<<`, `==` over `count` lines
fn apply_operator_on_lines(session: &mut EditorSession, op: Operator, count: usize) {
    let register = session.engine.pending.register.take();
    let start_row = session.active_buffer().cursor().row;
    let end_row = (start_row + count.max(1) - 1).min(session.active_buffer().line_count() - 1);
    run_line_operator(session, op, register, start_row, end_row);
    session.engine.pending.reset();
}

fn run_char_operator(
    session: &mut EditorSession,
    op: Operator,
    register: Option<char>,
    start: Position,
    end: Position,
) {
    match op {
        Operator::Delete | Operator::Change => {
            session.active_buffer_mut().begin_undo_group();
            let removed = session.active_buffer_mut().delete_range(start, end);
            if !removed.is_empty() {
                session
                    .registers
                    .record_delete(register, RegisterValue::new(removed, RegisterKind::Charwise));
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
        // Indent-family operators always act on whole lines
        Operator::Indent | Operator::Outdent | Operator::Reformat => {
            run_line_operator(session, op, register, start.row, end.row);
        }
    }
}

pub(super) fn run_line_operator(
    session: &mut EditorSession,
    op: Operator,
    register: Option<char>,
    start_row: usize,
    end_row: usize,
) {
    let end_row = end_row.min(session.active_buffer().line_count() - 1);
    match op {
        Operator::Delete | Operator::Change => {
            let text: String = (start_row..=end_row)
                .filter_map(|row| session.active_buffer().line(row))
                .map(|line| format!("{line}\n"))
                .collect();
            session
                .registers
                .record_delete(register, RegisterValue::new(text, RegisterKind::Linewise));

            session.active_buffer_mut().begin_undo_group();
            if op == Operator::Change {
                // cc keeps the rows and clears the first
                let buf = session.active_buffer_mut();
                for _ in start_row + 1..=end_row {
                    buf.delete_line(start_row + 1);
                }
                buf.replace_line(start_row, "");
                buf.set_cursor(start_row, 0);
                session.enter_insert();
            } else {
                let buf = session.active_buffer_mut();
                for _ in start_row..=end_row {
                    buf.delete_line(start_row.min(buf.line_count() - 1));
                }
                buf.set_cursor(start_row, 0);
                buf.end_undo_group();
                session.clamp_cursor_column();
            }
        }
        Operator::Yank => {
            let text: String = (start_row..=end_row)
                .filter_map(|row| session.active_buffer().line(row))
                .map(|line| format!("{line}\n"))
                .collect();
            session
                .registers
                .record_yank(register, RegisterValue::new(text, RegisterKind::Linewise));
            session
                .active_buffer_mut()
                .set_cursor(start_row, 0);
        }
        Operator::Indent => {
            let unit = session.options.indent_unit();
            session.active_buffer_mut().begin_undo_group();
            for row in start_row..=end_row {
                let line = session.active_buffer().line(row).unwrap_or("").to_string();
                if !line.is_empty() {
                    session
                        .active_buffer_mut()
                        .replace_line(row, format!("{unit}{line}"));
                }
            }
            session.active_buffer_mut().end_undo_group();
            session.clamp_cursor_column();
        }
        Operator::Outdent => {
            let shiftwidth = session.options.shiftwidth;
            session.active_buffer_mut().begin_undo_group();
            for row in start_row..=end_row {
                let line = session.active_buffer().line(row).unwrap_or("").to_string();
                let trimmed = outdent_line(&line, shiftwidth);
                session.active_buffer_mut().replace_line(row, trimmed);
            }
            session.active_buffer_mut().end_undo_group();
            session.clamp_cursor_column();
        }
        Operator::Reformat => {
            // Re-indent each line to the indent of the previous non-blank line
            session.active_buffer_mut().begin_undo_group();
            for row in start_row..=end_row {
                let reference = reference_indent(session, row);
                let line = session.active_buffer().line(row).unwrap_or("").to_string();
                let body = line.trim_start();
                if !body.is_empty() {
                    session
                        .active_buffer_mut()
                        .replace_line(row, format!("{reference}{body}"));
                }
            }
            session.active_buffer_mut().end_undo_group();
            session.clamp_cursor_column();
        }
    }
}

/// Strip up to one indent level from the front of a line
fn outdent_line(line: &str, shiftwidth: usize) -> String {
    if let Some(rest) = line.strip_prefix('\t') {
        return rest.to_string();
    }
    let strip = line
        .chars()
        .take(shiftwidth)
        .take_while(|c| *c == ' ')
        .count();
    line.chars().skip(strip).collect()
}

/// Leading whitespace of the closest non-blank line above `row`
fn reference_indent(session: &EditorSession, row: usize) -> String {
    let buf = session.active_buffer();
    for r in (0..row).rev() {
        let line = buf.line(r).unwrap_or("");
        if !line.trim().is_empty() {
            return line
                .chars()
                .take_while(|c| c.is_whitespace())
                .collect();
        }
    }
    String::new()
}

// ============================================================
// Single-key edit helpers
// ============================================================

fn delete_to_line_end(session: &mut EditorSession) {
    let register = session.engine.pending.register.take();
    let pos = session.active_buffer().cursor();
    let len = session.active_buffer().line_len(pos.row);
    let removed = session
        .active_buffer_mut()
        .delete(pos, len.saturating_sub(pos.col));
    if !removed.is_empty() {
        session
            .registers
            .record_delete(register, RegisterValue::new(removed, RegisterKind::Charwise));
    }
    session.clamp_cursor_column();
}

fn join_lines(session: &mut EditorSession, count: usize) {
    let joins = count.saturating_sub(1).max(1);
    session.active_buffer_mut().begin_undo_group();
    let row = session.active_buffer().cursor().row;
    for _ in 0..joins {
        let Some(next) = session.active_buffer().line(row + 1).map(str::to_string) else {
            break;
        };
        let current = session.active_buffer().line(row).unwrap_or("").to_string();
        let trimmed = next.trim_start();
        let joined = if current.is_empty() || current.ends_with(' ') || trimmed.is_empty() {
            format!("{current}{trimmed}")
        } else {
            format!("{current} {trimmed}")
        };
        let join_col = current.chars().count();
        let buf = session.active_buffer_mut();
        buf.replace_line(row, joined);
        buf.delete_line(row + 1);
        buf.set_cursor(row, join_col);
    }
    session.active_buffer_mut().end_undo_group();
    session.clamp_cursor_column();
}

fn replace_chars(session: &mut EditorSession, replacement: char) {
    let count = session.engine.pending.count.unwrap_or(1).max(1);
    let pos = session.active_buffer().cursor();
    let len = session.active_buffer().line_len(pos.row);
    if pos.col + count > len {
        return; // not enough characters under the cursor
    }
    let line = session.active_buffer().line(pos.row).unwrap_or("").to_string();
    let new_line: String = line
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i >= pos.col && i < pos.col + count {
                replacement
            } else {
                c
            }
        })
        .collect();
    let buf = session.active_buffer_mut();
    buf.replace_line(pos.row, new_line);
    buf.set_cursor(pos.row, pos.col + count - 1);
}

fn paste(session: &mut EditorSession, after: bool) {
    let register = session.engine.pending.register.take();
    let value = session.registers.get(register);
    if value.text.is_empty() {
        return;
    }
    let cursor = session.active_buffer().cursor();

    match value.kind {
        RegisterKind::Charwise => {
            let len = session.active_buffer().line_len(cursor.row);
            let col = if after && len > 0 { cursor.col + 1 } else { cursor.col };
            session.active_buffer_mut().begin_undo_group();
            let end = session
                .active_buffer_mut()
                .insert(Position::new(cursor.row, col), &value.text);
            session.active_buffer_mut().end_undo_group();
            session
                .active_buffer_mut()
                .set_cursor(end.row, end.col.saturating_sub(1));
        }
        RegisterKind::Linewise => {
            let lines: Vec<&str> = value.text.trim_end_matches('\n').split('\n').collect();
            let insert_row = if after { cursor.row + 1 } else { cursor.row };
            session.active_buffer_mut().begin_undo_group();
            for (i, line) in lines.iter().enumerate() {
                session.active_buffer_mut().insert_line(insert_row + i, *line);
            }
            session.active_buffer_mut().end_undo_group();
            let col = movement::first_non_blank(lines.first().unwrap_or(&""));
            session.active_buffer_mut().set_cursor(insert_row, col);
        }
        RegisterKind::Blockwise => {
            let col = if after { cursor.col + 1 } else { cursor.col };
            session.active_buffer_mut().begin_undo_group();
            for (i, block_line) in value.text.split('\n').enumerate() {
                let row = cursor.row + i;
                if row >= session.active_buffer().line_count() {
                    session.active_buffer_mut().append_line("");
                }
                let len = session.active_buffer().line_len(row);
                if len < col {
                    let line = session.active_buffer().line(row).unwrap_or("").to_string();
                    let padded = format!("{line}{}", " ".repeat(col - len));
                    session.active_buffer_mut().replace_line(row, padded);
                }
                session
                    .active_buffer_mut()
                    .insert(Position::new(row, col), block_line);
            }
            session.active_buffer_mut().end_undo_group();
            session.active_buffer_mut().set_cursor(cursor.row, col);
        }
    }
    session.clamp_cursor_column();
}

fn half_page(session: &mut EditorSession, down: bool) {
    let half = (session.active_window().rect.height / 2).max(1) as isize;
    move_cursor_rows(session, if down { half } else { -half });
}

fn move_cursor_rows(session: &mut EditorSession, delta: isize) {
    let cursor = session.active_buffer().cursor();
    let line_count = session.active_buffer().line_count();
    let row = if delta >= 0 {
        (cursor.row + delta as usize).min(line_count - 1)
    } else {
        cursor.row.saturating_sub(delta.unsigned_abs())
    };
    session.active_buffer_mut().set_cursor(row, cursor.col);
    session.clamp_cursor_column();
}
