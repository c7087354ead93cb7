//! Strand - a vim-like modal editing core for the terminal
//! Main entry point: wires the terminal backend, clipboard, and session
//! into the input loop

use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use strand::mode::Mode;
use strand::registers::SystemClipboard;
use strand::session::EditorSession;
use strand::split::Rect;
use strand::term::crossterm::CrosstermBackend;
use strand::term::TerminalBackend;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() {
    let mut backend = CrosstermBackend::new();
    let result = run(&mut backend);
    backend.deinit();
    if let Err(e) = result {
        eprintln!("strand: {e}");
        std::process::exit(1);
    }
}

fn run(backend: &mut CrosstermBackend) -> Result<()> {
    backend
        .init()
        .map_err(|e| anyhow!(e))
        .context("failed to initialize terminal")?;

    let size = backend.size().map_err(|e| anyhow!(e))?;
    // The bottom row is reserved for the status line
    let area = Rect::new(0, 0, size.rows.saturating_sub(1) as usize, size.cols as usize);
    let mut session = EditorSession::new(area);
    session
        .registers
        .set_clipboard(Box::new(SystemClipboard::new()));

    if let Some(path) = std::env::args().nth(1) {
        match session.open_file(&path) {
            Ok(message) => session.set_status(&message),
            Err(err) => session.set_error(&err),
        }
    }

    while !session.should_quit() {
        match backend.poll_key(POLL_INTERVAL).map_err(|e| anyhow!(e))? {
            Some(key) => session.feed_key(key),
            None => session.tick(),
        }
        draw(backend, &session).map_err(|e| anyhow!(e))?;
    }
    Ok(())
}

/// Paint the active window's visible slice plus the status line
fn draw(backend: &mut CrosstermBackend, session: &EditorSession) -> Result<(), String> {
    backend.clear()?;

    let window = session.active_window();
    let gutter = session.gutter_width();
    let cursor_row = session.active_buffer().cursor().row;

    for (i, line) in session.visible_lines().iter().enumerate() {
        let buffer_row = window.scroll_line + i;
        let screen_row = (window.rect.row + i) as u16;
        if gutter > 0 {
            let label = if session.options.relativenumber && buffer_row != cursor_row {
                buffer_row.abs_diff(cursor_row)
            } else {
                buffer_row + 1
            };
            backend.print(
                screen_row,
                window.rect.col as u16,
                &format!("{label:>width$} ", width = gutter - 1),
            )?;
        }
        let visible: String = line
            .chars()
            .skip(window.scroll_col)
            .take(window.rect.width.saturating_sub(gutter))
            .collect();
        backend.print(screen_row, (window.rect.col + gutter) as u16, &visible)?;
    }

    let status_row = (window.rect.row + window.rect.height) as u16;
    let status = match session.status() {
        Some(message) => format!("-- {} -- {}", session.mode.label(), message.text),
        None => format!("-- {} --", session.mode.label()),
    };
    let cmdline = session
        .engine
        .cmdline
        .as_ref()
        .map(|state| format!("{}{}", state.prompt.symbol(), state.text));
    match (session.mode, cmdline) {
        (Mode::Command, Some(text)) => backend.print(status_row, 0, &text)?,
        _ => backend.print(status_row, 0, &status)?,
    }

    let (row, col) = session.cursor_screen_position();
    backend.move_cursor(row as u16, col as u16)?;
    backend.flush()
}
