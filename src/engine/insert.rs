//! Insert and Replace modes
//!
//! Printable keys mutate the buffer at the cursor. The whole mode session
//! is one undo group: entering the mode opens it, `<Esc>` closes it.
//! Replace mode overtypes instead of inserting and falls back to plain
//! insertion at the end of the line.

use crate::buffer::Position;
use crate::key::Key;
use crate::mode::Mode;
use crate::session::EditorSession;

pub fn handle_key(session: &mut EditorSession, key: Key) -> bool {
    match key {
        Key::Escape | Key::Ctrl('c') => {
            session.leave_insert();
            true
        }

        Key::Char(c) => {
            if session.mode == Mode::Replace {
                overtype_char(session, c);
            } else {
                insert_char(session, c);
            }
            true
        }

        Key::Enter => {
            let cursor = session.active_buffer().cursor();
            let end = session.active_buffer_mut().insert(cursor, "\n");
            session.active_buffer_mut().set_cursor(end.row, end.col);
            true
        }

        Key::Tab => {
            let text = if session.options.expandtab {
                " ".repeat(session.options.tabstop)
            } else {
                "\t".to_string()
            };
            let cursor = session.active_buffer().cursor();
            let end = session.active_buffer_mut().insert(cursor, &text);
            session.active_buffer_mut().set_cursor(end.row, end.col);
            true
        }

        Key::Backspace => {
            backspace(session);
            true
        }

        Key::Delete => {
            let cursor = session.active_buffer().cursor();
            session.active_buffer_mut().delete(cursor, 1);
            true
        }

        // Plain cursor movement stays available while inserting
        Key::Left => {
            let cursor = session.active_buffer().cursor();
            session
                .active_buffer_mut()
                .set_cursor(cursor.row, cursor.col.saturating_sub(1));
            true
        }
        Key::Right => {
            let cursor = session.active_buffer().cursor();
            session
                .active_buffer_mut()
                .set_cursor(cursor.row, cursor.col + 1);
            true
        }
        Key::Up => {
            let cursor = session.active_buffer().cursor();
            session
                .active_buffer_mut()
                .set_cursor(cursor.row.saturating_sub(1), cursor.col);
            true
        }
        Key::Down => {
            let cursor = session.active_buffer().cursor();
            session
                .active_buffer_mut()
                .set_cursor(cursor.row + 1, cursor.col);
            true
        }
        Key::Home => {
            let row = session.active_buffer().cursor().row;
            session.active_buffer_mut().set_cursor(row, 0);
            true
        }
        Key::End => {
            let cursor = session.active_buffer().cursor();
            let len = session.active_buffer().line_len(cursor.row);
            session.active_buffer_mut().set_cursor(cursor.row, len);
            true
        }

        _ => false,
    }
}

fn insert_char(session: &mut EditorSession, c: char) {
    let cursor = session.active_buffer().cursor();
    let end = session
        .active_buffer_mut()
        .insert(cursor, &c.to_string());
    session.active_buffer_mut().set_cursor(end.row, end.col);
}

fn overtype_char(session: &mut EditorSession, c: char) {
    let cursor = session.active_buffer().cursor();
    let len = session.active_buffer().line_len(cursor.row);
    if cursor.col < len {
        session.active_buffer_mut().delete(cursor, 1);
    }
    let end = session
        .active_buffer_mut()
        .insert(cursor, &c.to_string());
    session.active_buffer_mut().set_cursor(end.row, end.col);
}

/// Backspace deletes the previous character, merging with the previous
/// line at column zero.
fn backspace(session: &mut EditorSession) {
    let cursor = session.active_buffer().cursor();
    if cursor.col > 0 {
        let at = Position::new(cursor.row, cursor.col - 1);
        session.active_buffer_mut().delete(at, 1);
        session.active_buffer_mut().set_cursor(at.row, at.col);
    } else if cursor.row > 0 {
        let prev_len = session.active_buffer().line_len(cursor.row - 1);
        let buf = session.active_buffer_mut();
        buf.join_lines(cursor.row - 1);
        buf.set_cursor(cursor.row - 1, prev_len);
    }
}
