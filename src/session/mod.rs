//! Editor session
//!
//! ## session/ Invariants
//!
//! - The session is an explicit value owned by the host loop; there are
//!   no ambient globals.
//! - Every window's buffer id refers to a live buffer in the table.
//! - One key event is processed to completion before the next is
//!   accepted; the only deferred work is the keymap deadline.
//! - No operation here terminates the process; failures become status
//!   messages or rejected no-ops.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::buffer::search::SearchOptions;
use crate::buffer::{BufferId, Position, Selection, SelectionKind, TextBuffer};
use crate::command_line;
use crate::engine::{self, CmdlinePrompt, CmdlineState, EngineState};
use crate::error::{ErrorSeverity, StrandError};
use crate::fs::{FileSystem, StdFileSystem};
use crate::key::{parse_key_sequence, Key};
use crate::keymap::{
    Clock, Keymap, KeymapEntry, KeymapFlags, KeyResolver, MapMode, MappedAction, Resolution,
    SystemClock,
};
use crate::mode::{Mode, VisualKind};
use crate::options::Options;
use crate::registers::RegisterFile;
use crate::split::{Rect, SplitOrientation, TabSet, Window};

/// A transient status-line message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: ErrorSeverity,
}

const MAX_REMAP_DEPTH: usize = 16;

/// The composition root: buffers, layout, registers, options, and mode
/// state, driven one key at a time by the host loop.
pub struct EditorSession {
    buffers: HashMap<BufferId, TextBuffer>,
    buffer_order: Vec<BufferId>,
    next_buffer_id: BufferId,
    pub tabs: TabSet,
    pub registers: RegisterFile,
    pub options: Options,
    pub mode: Mode,
    pub engine: EngineState,
    pub keymap: Keymap,
    resolver: KeyResolver,
    clock: Box<dyn Clock>,
    fs: Box<dyn FileSystem>,
    status: Option<StatusMessage>,
    /// Active search pattern for highlight, cleared by `:nohlsearch`
    highlight: Option<String>,
    should_quit: bool,
    remap_depth: usize,
}

impl EditorSession {
    /// A session with the real clock and file system
    #[must_use]
    pub fn new(area: Rect) -> Self {
        Self::with_collaborators(area, Box::new(StdFileSystem), Box::new(SystemClock))
    }

    /// A session with injected collaborators (tests use a memory file
    /// system and a manual clock)
    #[must_use]
    pub fn with_collaborators(
        area: Rect,
        fs: Box<dyn FileSystem>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let scratch_id: BufferId = 1;
        let scratch = TextBuffer::new(scratch_id, "[No Name]");
        let mut buffers = HashMap::new();
        buffers.insert(scratch_id, scratch);

        EditorSession {
            buffers,
            buffer_order: vec![scratch_id],
            next_buffer_id: scratch_id + 1,
            tabs: TabSet::new(scratch_id, area),
            registers: RegisterFile::new(),
            options: Options::default(),
            mode: Mode::Normal,
            engine: EngineState::default(),
            keymap: Keymap::new(),
            resolver: KeyResolver::new(),
            clock,
            fs,
            status: None,
            highlight: None,
            should_quit: false,
            remap_depth: 0,
        }
    }

    // ============================================================
    // Accessors
    // ============================================================

    #[must_use]
    pub fn active_window(&self) -> &Window {
        self.tabs.active().active_window()
    }

    pub fn active_window_mut(&mut self) -> &mut Window {
        self.tabs.active_mut().active_window_mut()
    }

    #[must_use]
    pub fn active_buffer(&self) -> &TextBuffer {
        let id = self.active_window().buffer;
        &self.buffers[&id]
    }

    pub fn active_buffer_mut(&mut self) -> &mut TextBuffer {
        let id = self.active_window().buffer;
        self.buffers.get_mut(&id).expect("window buffer is live")
    }

    #[must_use]
    pub fn buffer(&self, id: BufferId) -> Option<&TextBuffer> {
        self.buffers.get(&id)
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, text: &str) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            severity: ErrorSeverity::Info,
        });
    }

    pub fn set_error(&mut self, err: &StrandError) {
        self.status = Some(StatusMessage {
            text: err.message.clone(),
            severity: err.severity,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    #[must_use]
    pub fn search_highlight(&self) -> Option<&str> {
        if self.options.hlsearch {
            self.highlight.as_deref()
        } else {
            None
        }
    }

    pub fn clear_search_highlight(&mut self) {
        self.highlight = None;
    }

    // ============================================================
    // Input entry points
    // ============================================================

    /// Process one canonical key to completion
    pub fn feed_key(&mut self, key: Key) {
        let map_mode = MapMode::from(self.mode);
        if self.keymap.is_empty_for(map_mode) && self.resolver.is_idle() {
            engine::handle_key(self, key);
            self.after_key();
            return;
        }

        let buffer_id = self.active_window().buffer;
        let timeout = Duration::from_millis(self.options.timeoutlen as u64);
        let resolution = self.resolver.feed(
            &self.keymap,
            map_mode,
            Some(buffer_id),
            key,
            timeout,
            self.clock.as_ref(),
        );
        self.apply_resolution(resolution);
        self.after_key();
    }

    /// Check the keymap deadline; called by the host between input polls
    pub fn tick(&mut self) {
        if let Some(resolution) = self.resolver.poll(self.clock.as_ref()) {
            self.apply_resolution(resolution);
            self.after_key();
        }
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Pending => {}
            Resolution::Mapped { entry, leftover } => {
                self.apply_mapping(&entry);
                for key in leftover {
                    self.feed_key(key);
                }
            }
            Resolution::Unmapped(keys) => {
                for key in keys {
                    engine::handle_key(self, key);
                }
            }
        }
    }

    fn apply_mapping(&mut self, entry: &KeymapEntry) {
        match &entry.action {
            MappedAction::Named(name) => {
                command_line::execute_line(self, name);
            }
            MappedAction::Keys(keys) => {
                if self.remap_depth >= MAX_REMAP_DEPTH {
                    self.set_status("Recursive mapping");
                    return;
                }
                self.remap_depth += 1;
                for key in keys.clone() {
                    if entry.flags.noremap {
                        engine::handle_key(self, key);
                    } else {
                        self.feed_key(key);
                    }
                }
                self.remap_depth -= 1;
            }
        }
    }

    fn after_key(&mut self) {
        self.clamp_cursor_column();
        self.scroll_to_cursor();
    }

    // ============================================================
    // Mapping registration
    // ============================================================

    /// Map a trigger to a replacement key sequence
    pub fn map_keys(
        &mut self,
        modes: &[MapMode],
        trigger: &str,
        replacement: &str,
        flags: KeymapFlags,
    ) -> bool {
        let (Some(trigger), Some(keys)) = (
            parse_key_sequence(trigger),
            parse_key_sequence(replacement),
        ) else {
            return false;
        };
        self.keymap.register(
            modes,
            KeymapEntry {
                trigger,
                action: MappedAction::Keys(keys),
                flags,
                buffer: None,
            },
        );
        true
    }

    /// Map a trigger to a named (ex) action
    pub fn map_action(
        &mut self,
        modes: &[MapMode],
        trigger: &str,
        action: &str,
        flags: KeymapFlags,
    ) -> bool {
        let Some(trigger) = parse_key_sequence(trigger) else {
            return false;
        };
        self.keymap.register(
            modes,
            KeymapEntry {
                trigger,
                action: MappedAction::Named(action.to_string()),
                flags,
                buffer: None,
            },
        );
        true
    }

    // ============================================================
    // Mode transitions
    // ============================================================

    pub fn enter_insert(&mut self) {
        if self.active_buffer().readonly {
            self.set_status("Buffer is read-only");
            return;
        }
        self.active_buffer_mut().begin_undo_group();
        self.mode = Mode::Insert;
    }

    pub fn enter_replace(&mut self) {
        if self.active_buffer().readonly {
            self.set_status("Buffer is read-only");
            return;
        }
        self.active_buffer_mut().begin_undo_group();
        self.mode = Mode::Replace;
    }

    /// Leave Insert/Replace: close the undo group and keep the cursor on
    /// the last character of the line
    pub fn leave_insert(&mut self) {
        self.active_buffer_mut().end_undo_group();
        self.mode = Mode::Normal;
        self.clamp_cursor_column();
    }

    pub fn enter_visual(&mut self, kind: VisualKind) {
        let anchor = self.active_buffer().cursor();
        let selection_kind = match kind {
            VisualKind::Charwise => SelectionKind::Charwise,
            VisualKind::Linewise => SelectionKind::Linewise,
            VisualKind::Blockwise => SelectionKind::Blockwise,
        };
        self.active_buffer_mut().set_selection(Some(Selection {
            start: anchor,
            end: anchor,
            kind: selection_kind,
        }));
        self.mode = Mode::Visual(kind);
    }

    /// Leave Visual mode, clearing the selection
    pub fn leave_visual(&mut self) {
        self.active_buffer_mut().set_selection(None);
        self.mode = Mode::Normal;
        self.engine.pending.reset();
    }

    pub fn enter_cmdline(&mut self, prompt: CmdlinePrompt) {
        self.engine.cmdline = Some(CmdlineState::new(prompt));
        self.mode = Mode::Command;
    }

    pub fn leave_cmdline(&mut self) {
        self.engine.cmdline = None;
        self.mode = Mode::Normal;
    }

    /// In Normal/Visual mode the cursor never rests past the last
    /// character of the line
    pub fn clamp_cursor_column(&mut self) {
        if matches!(self.mode, Mode::Insert | Mode::Replace | Mode::Command) {
            return;
        }
        let cursor = self.active_buffer().cursor();
        let len = self.active_buffer().line_len(cursor.row);
        if cursor.col >= len && len > 0 {
            self.active_buffer_mut().set_cursor(cursor.row, len - 1);
        }
    }

    fn scroll_to_cursor(&mut self) {
        let cursor = self.active_buffer().cursor();
        let line_count = self.active_buffer().line_count();
        let scrolloff = self.options.scrolloff;
        let sidescrolloff = self.options.sidescrolloff;
        self.active_window_mut()
            .ensure_cursor_visible(cursor, line_count, scrolloff, sidescrolloff);
    }

    // ============================================================
    // Search
    // ============================================================

    /// Run a `/` or `?` search from the cursor, honoring `ignorecase` and
    /// `wrapscan`
    pub fn start_search(&mut self, pattern: &str, backwards: bool) {
        if pattern.is_empty() {
            return;
        }
        self.engine.last_search = Some((pattern.to_string(), backwards));
        self.highlight = Some(pattern.to_string());
        self.search_from_cursor(pattern, backwards);
    }

    /// `n`/`N`: repeat the last search, optionally reversed
    pub fn repeat_search(&mut self, reverse: bool) {
        let Some((pattern, backwards)) = self.engine.last_search.clone() else {
            self.set_status("No previous search");
            return;
        };
        self.search_from_cursor(&pattern, backwards != reverse);
    }

    fn search_from_cursor(&mut self, pattern: &str, backwards: bool) {
        let cursor = self.active_buffer().cursor();
        let start = if backwards {
            cursor
        } else {
            Position::new(cursor.row, cursor.col + 1)
        };
        let opts = SearchOptions {
            start,
            case_sensitive: !self.options.ignorecase,
            regex: true,
            backwards,
        };

        let mut found = self.active_buffer().find(pattern, &opts);
        if found.is_none() && self.options.wrapscan {
            let wrapped_start = if backwards {
                let buf = self.active_buffer();
                let last = buf.line_count() - 1;
                Position::new(last, buf.line_len(last))
            } else {
                Position::new(0, 0)
            };
            let wrapped = SearchOptions {
                start: wrapped_start,
                ..opts
            };
            found = self.active_buffer().find(pattern, &wrapped);
        }

        match found {
            Some(m) => {
                self.active_buffer_mut().set_cursor(m.start.row, m.start.col);
                self.clamp_cursor_column();
            }
            None => {
                self.set_error(&StrandError::user_input(
                    "PATTERN_NOT_FOUND",
                    format!("Pattern not found: {pattern}"),
                ));
            }
        }
    }

    // ============================================================
    // Buffers and files
    // ============================================================

    fn allocate_buffer(&mut self, buffer: TextBuffer) -> BufferId {
        let id = buffer.id();
        self.buffers.insert(id, buffer);
        self.buffer_order.push(id);
        id
    }

    fn filetype_of(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_string)
    }

    /// `:e path` — read a file into a new buffer and show it in the
    /// active window. A missing file opens an empty buffer bound to the
    /// path; any other read failure leaves the session untouched.
    pub fn open_file(&mut self, path: &str) -> Result<String, StrandError> {
        let path_buf = PathBuf::from(path);
        let name = path_buf
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();

        let (buffer, message) = match self.fs.read_file(&path_buf) {
            Ok(text) => {
                let trimmed = text.strip_suffix('\n').unwrap_or(&text);
                let buffer = TextBuffer::from_text(self.next_buffer_id, &name, trimmed);
                let lines = buffer.line_count();
                (buffer, format!("\"{path}\" {lines}L"))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let buffer = TextBuffer::new(self.next_buffer_id, &name);
                (buffer, format!("\"{path}\" [New File]"))
            }
            Err(err) => return Err(StrandError::io("READ_FAILED", &err)),
        };

        self.next_buffer_id += 1;
        let mut buffer = buffer;
        buffer.path = Some(path_buf.clone());
        buffer.filetype = Self::filetype_of(&path_buf);
        let id = self.allocate_buffer(buffer);
        self.active_window_mut().buffer = id;
        Ok(message)
    }

    /// `:e` with no path — reload the active buffer from disk
    pub fn reload_active_buffer(&mut self, force: bool) -> Result<String, StrandError> {
        if self.active_buffer().modified && !force {
            return Err(StrandError::user_input(
                "UNSAVED_CHANGES",
                "No write since last change (add ! to override)",
            ));
        }
        let Some(path) = self.active_buffer().path.clone() else {
            return Err(StrandError::user_input("NO_FILE_NAME", "No file name"));
        };

        let text = self
            .fs
            .read_file(&path)
            .map_err(|err| StrandError::io("READ_FAILED", &err))?;
        let trimmed = text.strip_suffix('\n').unwrap_or(&text);

        let old = self.active_buffer();
        let mut fresh = TextBuffer::from_text(old.id(), old.name.clone(), trimmed);
        fresh.path = Some(path.clone());
        fresh.filetype = old.filetype.clone();
        let lines = fresh.line_count();
        self.buffers.insert(fresh.id(), fresh);
        Ok(format!("\"{}\" {lines}L", path.display()))
    }

    /// `:w [path]` — write the active buffer. A failed write leaves the
    /// `modified` flag untouched.
    pub fn write_active_buffer(&mut self, path: Option<&str>) -> Result<String, StrandError> {
        if self.active_buffer().readonly {
            return Err(StrandError::user_input(
                "READ_ONLY",
                "Buffer is read-only",
            ));
        }
        let target = match path {
            Some(p) => PathBuf::from(p),
            None => self
                .active_buffer()
                .path
                .clone()
                .ok_or_else(|| StrandError::user_input("NO_FILE_NAME", "No file name"))?,
        };

        let text = format!("{}\n", self.active_buffer().to_text());
        self.fs
            .write_file(&target, &text)
            .map_err(|err| StrandError::io("WRITE_FAILED", &err))?;

        let lines = self.active_buffer().line_count();
        let buffer = self.active_buffer_mut();
        if buffer.path.is_none() {
            buffer.path = Some(target.clone());
        }
        buffer.modified = false;
        Ok(format!("\"{}\" {lines}L written", target.display()))
    }

    /// `:bn` / `:bp` — cycle the active window through the buffer list
    pub fn cycle_buffer(&mut self, forward: bool) {
        let current = self.active_window().buffer;
        let Some(idx) = self.buffer_order.iter().position(|&id| id == current) else {
            return;
        };
        let len = self.buffer_order.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.active_window_mut().buffer = self.buffer_order[next];
    }

    // ============================================================
    // Windows and tabs
    // ============================================================

    pub fn split_window(&mut self, orientation: SplitOrientation) {
        self.tabs.active_mut().split(orientation);
    }

    /// Close the active window. Rejected (false) for the tab's last
    /// window.
    pub fn close_active_window(&mut self) -> bool {
        let id = self.active_window().id;
        self.tabs.active_mut().close_window(id)
    }

    pub fn focus_next_window(&mut self) {
        self.tabs.active_mut().tree.focus_next();
    }

    pub fn new_tab(&mut self) {
        let buffer = self.active_window().buffer;
        self.tabs.new_tab(buffer);
    }

    // ============================================================
    // Display interface
    // ============================================================

    /// The active window's visible line slice
    #[must_use]
    pub fn visible_lines(&self) -> &[String] {
        let buffer = self.active_buffer();
        let (start, end) = self.active_window().visible_range(buffer.line_count());
        &buffer.lines()[start..end]
    }

    /// Width of the line-number gutter, 0 when numbering is off
    #[must_use]
    pub fn gutter_width(&self) -> usize {
        if !self.options.number && !self.options.relativenumber {
            return 0;
        }
        let digits = self.active_buffer().line_count().to_string().len();
        digits.max(3) + 1
    }

    /// Cursor position in screen cells, relative to the terminal origin
    #[must_use]
    pub fn cursor_screen_position(&self) -> (usize, usize) {
        let cursor = self.active_buffer().cursor();
        let window = self.active_window();
        let row = window.rect.row + cursor.row.saturating_sub(window.scroll_line);
        let col = window.rect.col
            + self.gutter_width()
            + cursor.col.saturating_sub(window.scroll_col);
        (row, col)
    }
}
