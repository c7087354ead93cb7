//! Key representation and canonical token names
//!
//! Every input event is canonicalized into a [`Key`] before it reaches the
//! keymap or the mode engine. Bracketed token names (`<CR>`, `<C-w>`,
//! `<S-Tab>`, `<F5>`, ...) are the textual form used when registering
//! mappings.

use std::fmt;

/// Represents a key press event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character
    Char(char),
    /// Control key combination (e.g., Ctrl+W)
    Ctrl(char),
    /// Arrow keys
    Up,
    Down,
    Left,
    Right,
    /// Navigation keys
    Home,
    End,
    PageUp,
    PageDown,
    /// Editing keys
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    /// Shift+Tab
    BackTab,
    /// Function keys F1..=F12
    F(u8),
}

impl Key {
    /// Canonical token name for this key
    ///
    /// Printable characters render as themselves; everything else uses the
    /// bracketed form.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Key::Char(' ') => "<Space>".to_string(),
            Key::Char('<') => "<lt>".to_string(),
            Key::Char(c) => c.to_string(),
            Key::Ctrl(c) => format!("<C-{c}>"),
            Key::Up => "<Up>".to_string(),
            Key::Down => "<Down>".to_string(),
            Key::Left => "<Left>".to_string(),
            Key::Right => "<Right>".to_string(),
            Key::Home => "<Home>".to_string(),
            Key::End => "<End>".to_string(),
            Key::PageUp => "<PageUp>".to_string(),
            Key::PageDown => "<PageDown>".to_string(),
            Key::Backspace => "<BS>".to_string(),
            Key::Delete => "<Del>".to_string(),
            Key::Enter => "<CR>".to_string(),
            Key::Escape => "<Esc>".to_string(),
            Key::Tab => "<Tab>".to_string(),
            Key::BackTab => "<S-Tab>".to_string(),
            Key::F(n) => format!("<F{n}>"),
        }
    }

    /// Parse a single bracketed token body (the part between `<` and `>`)
    ///
    /// Token names are case-insensitive, matching the usual map-command
    /// conventions.
    fn from_token_body(body: &str) -> Option<Key> {
        let lower = body.to_ascii_lowercase();
        let key = match lower.as_str() {
            "cr" | "return" | "enter" => Key::Enter,
            "esc" => Key::Escape,
            "bs" => Key::Backspace,
            "del" => Key::Delete,
            "tab" => Key::Tab,
            "s-tab" => Key::BackTab,
            "space" => Key::Char(' '),
            "lt" => Key::Char('<'),
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            _ => {
                if let Some(rest) = lower.strip_prefix("c-") {
                    let mut chars = rest.chars();
                    let c = chars.next()?;
                    if chars.next().is_some() {
                        return None;
                    }
                    return Some(Key::Ctrl(c));
                }
                if let Some(rest) = lower.strip_prefix("s-") {
                    // Shift over a printable is just the uppercase character
                    let mut chars = rest.chars();
                    let c = chars.next()?;
                    if chars.next().is_some() {
                        return None;
                    }
                    return Some(Key::Char(c.to_ascii_uppercase()));
                }
                if let Some(rest) = lower.strip_prefix('f') {
                    let n: u8 = rest.parse().ok()?;
                    if (1..=12).contains(&n) {
                        return Some(Key::F(n));
                    }
                    return None;
                }
                return None;
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Parse a mapping trigger string into a key sequence
///
/// Plain characters map to `Key::Char`; bracketed tokens are canonicalized.
/// Returns `None` for malformed input (unterminated `<`, unknown token).
#[must_use]
pub fn parse_key_sequence(input: &str) -> Option<Vec<Key>> {
    let mut keys = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            let mut body = String::new();
            loop {
                match chars.next() {
                    Some('>') => break,
                    Some(ch) => body.push(ch),
                    None => return None,
                }
            }
            keys.push(Key::from_token_body(&body)?);
        } else {
            keys.push(Key::Char(c));
        }
    }

    if keys.is_empty() {
        None
    } else {
        Some(keys)
    }
}

/// Render a key sequence back to its canonical trigger string
#[must_use]
pub fn format_key_sequence(keys: &[Key]) -> String {
    keys.iter().map(Key::token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_characters() {
        assert_eq!(
            parse_key_sequence("dd"),
            Some(vec![Key::Char('d'), Key::Char('d')])
        );
    }

    #[test]
    fn parses_bracketed_tokens() {
        assert_eq!(parse_key_sequence("<CR>"), Some(vec![Key::Enter]));
        assert_eq!(parse_key_sequence("<esc>"), Some(vec![Key::Escape]));
        assert_eq!(parse_key_sequence("<C-w>s"), Some(vec![Key::Ctrl('w'), Key::Char('s')]));
        assert_eq!(parse_key_sequence("<S-Tab>"), Some(vec![Key::BackTab]));
        assert_eq!(parse_key_sequence("<F10>"), Some(vec![Key::F(10)]));
    }

    #[test]
    fn shift_over_printable_is_uppercase() {
        assert_eq!(parse_key_sequence("<S-a>"), Some(vec![Key::Char('A')]));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_key_sequence("<C-"), None);
        assert_eq!(parse_key_sequence("<F13>"), None);
        assert_eq!(parse_key_sequence("<bogus>"), None);
        assert_eq!(parse_key_sequence(""), None);
    }

    #[test]
    fn token_round_trip() {
        for trigger in ["<CR>", "<Esc>", "<BS>", "<Tab>", "<S-Tab>", "<C-w>", "<Up>", "<F5>", "gg"] {
            let keys = parse_key_sequence(trigger).unwrap();
            let rendered = format_key_sequence(&keys);
            assert_eq!(parse_key_sequence(&rendered).unwrap(), keys);
        }
    }
}
