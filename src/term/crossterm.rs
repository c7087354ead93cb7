//! Crossterm terminal backend

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::key::Key;

use super::{Size, TerminalBackend};

/// Terminal backend over crossterm
pub struct CrosstermBackend {
    stdout: io::Stdout,
    raw: bool,
}

impl CrosstermBackend {
    #[must_use]
    pub fn new() -> Self {
        CrosstermBackend {
            stdout: io::stdout(),
            raw: false,
        }
    }

    /// Decode a crossterm key event into the canonical [`Key`]
    fn decode(event: KeyEvent) -> Option<Key> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let key = match event.code {
            KeyCode::Char(c) => {
                if event.modifiers.contains(KeyModifiers::CONTROL) {
                    Key::Ctrl(c.to_ascii_lowercase())
                } else {
                    Key::Char(c)
                }
            }
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) if (1..=12).contains(&n) => Key::F(n),
            _ => return None,
        };
        Some(key)
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend for CrosstermBackend {
    fn init(&mut self) -> Result<(), String> {
        terminal::enable_raw_mode().map_err(|e| e.to_string())?;
        execute!(self.stdout, EnterAlternateScreen).map_err(|e| e.to_string())?;
        self.raw = true;
        Ok(())
    }

    fn deinit(&mut self) {
        if self.raw {
            let _ = execute!(self.stdout, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            self.raw = false;
        }
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>, String> {
        if !event::poll(timeout).map_err(|e| e.to_string())? {
            return Ok(None);
        }
        match event::read().map_err(|e| e.to_string())? {
            Event::Key(key_event) => Ok(Self::decode(key_event)),
            _ => Ok(None),
        }
    }

    fn size(&self) -> Result<Size, String> {
        let (cols, rows) = terminal::size().map_err(|e| e.to_string())?;
        Ok(Size { rows, cols })
    }

    fn clear(&mut self) -> Result<(), String> {
        queue!(self.stdout, Clear(ClearType::All)).map_err(|e| e.to_string())
    }

    fn print(&mut self, row: u16, col: u16, text: &str) -> Result<(), String> {
        queue!(self.stdout, MoveTo(col, row), Print(text)).map_err(|e| e.to_string())
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> Result<(), String> {
        queue!(self.stdout, MoveTo(col, row)).map_err(|e| e.to_string())
    }

    fn flush(&mut self) -> Result<(), String> {
        self.stdout.flush().map_err(|e| e.to_string())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        self.deinit();
    }
}
