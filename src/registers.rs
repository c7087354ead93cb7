//! Yank/delete registers
//!
//! Named text slots shared by the yank, delete, and paste operations. The
//! unnamed register `"` always mirrors the most recent yank or delete;
//! register `0` holds the last yank; registers `1`-`9` form a ring shifted
//! on every line-spanning delete. The `*` and `+` registers proxy the
//! system clipboard through [`ClipboardBackend`] so the core stays free of
//! any windowing dependency; the binary installs an `arboard`-backed
//! implementation.

use std::collections::HashMap;

/// How register content re-inserts on paste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
    /// Inline text inserted at the cursor
    Charwise,
    /// Whole lines inserted above/below the cursor line
    Linewise,
    /// A rectangular block inserted column-aligned
    Blockwise,
}

/// Text stored in a register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterValue {
    pub text: String,
    pub kind: RegisterKind,
}

impl RegisterValue {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: RegisterKind) -> Self {
        RegisterValue {
            text: text.into(),
            kind,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        RegisterValue::new("", RegisterKind::Charwise)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// System clipboard seam for the `*` and `+` registers
pub trait ClipboardBackend {
    fn get(&mut self) -> Option<String>;
    fn set(&mut self, text: &str) -> bool;
}

/// In-memory clipboard used by default and in tests
#[derive(Debug, Default)]
pub struct LocalClipboard {
    content: String,
}

impl ClipboardBackend for LocalClipboard {
    fn get(&mut self) -> Option<String> {
        Some(self.content.clone())
    }

    fn set(&mut self, text: &str) -> bool {
        self.content = text.to_string();
        true
    }
}

/// Clipboard backed by the OS via `arboard`
///
/// Construction degrades to a dead clipboard when no display/clipboard
/// service is reachable; register reads then come back empty.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        SystemClipboard {
            inner: arboard::Clipboard::new().ok(),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn get(&mut self) -> Option<String> {
        self.inner.as_mut()?.get_text().ok()
    }

    fn set(&mut self, text: &str) -> bool {
        self.inner
            .as_mut()
            .is_some_and(|c| c.set_text(text.to_string()).is_ok())
    }
}

const RING_SIZE: usize = 9;

/// The full register set
pub struct RegisterFile {
    unnamed: RegisterValue,
    yank: RegisterValue,
    ring: Vec<RegisterValue>,
    named: HashMap<char, RegisterValue>,
    clipboard: Box<dyn ClipboardBackend>,
}

impl RegisterFile {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clipboard(Box::new(LocalClipboard::default()))
    }

    #[must_use]
    pub fn with_clipboard(clipboard: Box<dyn ClipboardBackend>) -> Self {
        RegisterFile {
            unnamed: RegisterValue::empty(),
            yank: RegisterValue::empty(),
            ring: vec![RegisterValue::empty(); RING_SIZE],
            named: HashMap::new(),
            clipboard,
        }
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardBackend>) {
        self.clipboard = clipboard;
    }

    /// Record a yank. Goes to the unnamed register and register `0`, or to
    /// the explicitly named target instead of `0`.
    pub fn record_yank(&mut self, target: Option<char>, value: RegisterValue) {
        self.unnamed = value.clone();
        match target {
            Some(name) => self.store_named(name, value),
            None => self.yank = value,
        }
    }

    /// Record a delete. Goes to the unnamed register and shifts the
    /// `1`-`9` ring. An explicit target bypasses the ring.
    pub fn record_delete(&mut self, target: Option<char>, value: RegisterValue) {
        self.unnamed = value.clone();
        if let Some(name) = target {
            self.store_named(name, value);
            return;
        }
        self.ring.pop();
        self.ring.insert(0, value);
    }

    fn store_named(&mut self, name: char, value: RegisterValue) {
        match name {
            '"' => self.unnamed = value,
            '0' => self.yank = value,
            '1'..='9' => {
                let idx = name as usize - '1' as usize;
                self.ring[idx] = value;
            }
            '*' | '+' => {
                self.clipboard.set(&value.text);
            }
            _ => {
                self.named.insert(name, value);
            }
        }
    }

    /// Read a register. `None` selects the unnamed register.
    #[must_use]
    pub fn get(&mut self, name: Option<char>) -> RegisterValue {
        match name {
            None | Some('"') => self.unnamed.clone(),
            Some('0') => self.yank.clone(),
            Some(c @ '1'..='9') => self.ring[c as usize - '1' as usize].clone(),
            Some('*') | Some('+') => {
                let text = self.clipboard.get().unwrap_or_default();
                // Trailing newline marks linewise clipboard content
                let kind = if text.ends_with('\n') {
                    RegisterKind::Linewise
                } else {
                    RegisterKind::Charwise
                };
                RegisterValue::new(text, kind)
            }
            Some(c) => self
                .named
                .get(&c)
                .cloned()
                .unwrap_or_else(RegisterValue::empty),
        }
    }

    /// Non-empty registers with their names, for `:registers`
    #[must_use]
    pub fn listing(&self) -> Vec<(char, String)> {
        let mut out = Vec::new();
        if !self.unnamed.is_empty() {
            out.push(('"', self.unnamed.text.clone()));
        }
        if !self.yank.is_empty() {
            out.push(('0', self.yank.text.clone()));
        }
        for (i, value) in self.ring.iter().enumerate() {
            if !value.is_empty() {
                out.push((char::from(b'1' + i as u8), value.text.clone()));
            }
        }
        let mut names: Vec<&char> = self.named.keys().collect();
        names.sort();
        for name in names {
            out.push((*name, self.named[name].text.clone()));
        }
        out
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charwise(text: &str) -> RegisterValue {
        RegisterValue::new(text, RegisterKind::Charwise)
    }

    fn linewise(text: &str) -> RegisterValue {
        RegisterValue::new(text, RegisterKind::Linewise)
    }

    #[test]
    fn yank_fills_unnamed_and_zero() {
        let mut regs = RegisterFile::new();
        regs.record_yank(None, charwise("hello "));
        assert_eq!(regs.get(None).text, "hello ");
        assert_eq!(regs.get(Some('0')).text, "hello ");
    }

    #[test]
    fn delete_ring_shifts() {
        let mut regs = RegisterFile::new();
        regs.record_delete(None, linewise("first\n"));
        regs.record_delete(None, linewise("second\n"));
        assert_eq!(regs.get(Some('1')).text, "second\n");
        assert_eq!(regs.get(Some('2')).text, "first\n");
        assert_eq!(regs.get(None).text, "second\n");
    }

    #[test]
    fn ring_drops_oldest_past_nine() {
        let mut regs = RegisterFile::new();
        for i in 0..=10 {
            regs.record_delete(None, linewise(&format!("{i}\n")));
        }
        assert_eq!(regs.get(Some('1')).text, "10\n");
        assert_eq!(regs.get(Some('9')).text, "2\n");
    }

    #[test]
    fn every_delete_shifts_the_ring() {
        let mut regs = RegisterFile::new();
        regs.record_delete(None, linewise("line\n"));
        regs.record_delete(None, charwise("x"));
        assert_eq!(regs.get(None).text, "x");
        assert_eq!(regs.get(Some('1')).text, "x");
        assert_eq!(regs.get(Some('2')).text, "line\n");
    }

    #[test]
    fn named_register_bypasses_ring_and_zero() {
        let mut regs = RegisterFile::new();
        regs.record_yank(Some('a'), charwise("named"));
        assert_eq!(regs.get(Some('a')).text, "named");
        assert_eq!(regs.get(None).text, "named");
        assert!(regs.get(Some('0')).is_empty());

        regs.record_delete(Some('b'), linewise("gone\n"));
        assert_eq!(regs.get(Some('b')).text, "gone\n");
        assert!(regs.get(Some('1')).is_empty());
    }

    #[test]
    fn clipboard_registers_round_trip() {
        let mut regs = RegisterFile::new();
        regs.record_yank(Some('+'), charwise("shared"));
        assert_eq!(regs.get(Some('+')).text, "shared");
        assert_eq!(regs.get(Some('*')).text, "shared");
    }

    #[test]
    fn clipboard_linewise_detection() {
        let mut regs = RegisterFile::new();
        regs.record_yank(Some('+'), linewise("whole line\n"));
        assert_eq!(regs.get(Some('+')).kind, RegisterKind::Linewise);
    }

    #[test]
    fn listing_reports_non_empty_registers() {
        let mut regs = RegisterFile::new();
        regs.record_yank(None, charwise("y"));
        regs.record_delete(None, linewise("d\n"));
        regs.record_yank(Some('q'), charwise("n"));
        let listing = regs.listing();
        assert!(listing.contains(&('0', "y".to_string())));
        assert!(listing.contains(&('1', "d\n".to_string())));
        assert!(listing.contains(&('q', "n".to_string())));
    }
}
