//! Command mode
//!
//! Line editing for the `:` / `/` / `?` prompts. Printable characters
//! append to the line buffer, `<BS>` pops (and cancels on an empty
//! buffer), `<CR>` executes and returns to Normal mode.

use crate::command_line;
use crate::key::Key;
use crate::session::EditorSession;

use super::CmdlinePrompt;

pub fn handle_key(session: &mut EditorSession, key: Key) -> bool {
    match key {
        Key::Escape | Key::Ctrl('c') => {
            session.leave_cmdline();
            true
        }

        Key::Char(c) => {
            if let Some(state) = session.engine.cmdline.as_mut() {
                state.text.push(c);
            }
            true
        }

        Key::Backspace => {
            let cancel = match session.engine.cmdline.as_mut() {
                Some(state) => state.text.pop().is_none(),
                None => true,
            };
            if cancel {
                session.leave_cmdline();
            }
            true
        }

        Key::Enter => {
            let Some(state) = session.engine.cmdline.take() else {
                session.leave_cmdline();
                return true;
            };
            session.leave_cmdline();
            if state.text.is_empty() {
                return true;
            }
            match state.prompt {
                CmdlinePrompt::Ex => {
                    command_line::execute_line(session, &state.text);
                }
                CmdlinePrompt::SearchForward => {
                    session.start_search(&state.text, false);
                }
                CmdlinePrompt::SearchBackward => {
                    session.start_search(&state.text, true);
                }
            }
            true
        }

        _ => false,
    }
}
