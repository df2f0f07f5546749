//! # Editor
//!
//! The dispatcher, view/renderer and cursor/edit logic all live here: together they form the
//! single mutable object the read-eval-redraw loop drives. Everything in this module operates on
//! byte offsets, never Unicode scalar values — the one exception is tab expansion, which is a
//! byte-level rule too (a tab is one byte that renders as several).

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::iter::{repeat, successors};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::ansi_escape::*;
use crate::row::{HlType, Row};
use crate::sys;
use crate::syntax::SyntaxConf;
use crate::terminal::{self, AKey, Key, PageKey, RawModeGuard};
use crate::{Config, Error};

const HELP_MESSAGE: &str = "Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

macro_rules! set_status {
    ($editor:expr, $($arg:expr),*) => {
        $editor.status_msg = Some(StatusMessage::new(format!($($arg),*)))
    };
}

/// Cursor position and scroll offsets, all in text/render units (see `row.rs`).
#[derive(Debug, Clone, Default)]
struct CursorState {
    x: usize,
    y: usize,
    roff: usize,
    coff: usize,
}

/// A status message with the instant it was set, so the message bar can expire it.
struct StatusMessage {
    msg: String,
    time: Instant,
}

impl StatusMessage {
    fn new(msg: String) -> Self { Self { msg, time: Instant::now() } }
}

/// Session state for an in-progress incremental search. Created when find mode is entered,
/// dropped when it exits — this stands in for the C original's static locals.
struct FindSession {
    last_match: Option<usize>,
    direction: isize,
    saved_hl: Option<(usize, Vec<HlType>)>,
}

impl FindSession {
    fn new() -> Self { Self { last_match: None, direction: 1, saved_hl: None } }

    /// Undo the MATCH overlay from the previous call, if any.
    fn restore_hl(&mut self, rows: &mut [Row]) {
        if let Some((row_idx, hl)) = self.saved_hl.take() {
            if let Some(row) = rows.get_mut(row_idx) {
                row.hl = hl;
            }
        }
    }
}

/// Which modal prompt, if any, is currently driving the message bar and key dispatch.
enum PromptMode {
    Save(String),
    Find(String, CursorState, FindSession),
}

impl PromptMode {
    fn status_msg(&self) -> String {
        match self {
            Self::Save(buf) => format!("Save as: {buf} (ESC to cancel)"),
            Self::Find(buf, ..) => format!("Search: {buf} (Use ESC/Arrows/Enter)"),
        }
    }
}

/// Outcome of feeding one key to an active prompt.
enum PromptState {
    Active(String),
    Completed(String),
    Cancelled,
}

fn process_prompt_keypress(mut buffer: String, key: Key) -> PromptState {
    match key {
        Key::Byte(b'\r') => PromptState::Completed(buffer),
        Key::Escape => PromptState::Cancelled,
        Key::Byte(b) if b == ctrl_key(b'Q') => PromptState::Cancelled,
        Key::Byte(b) if b == ctrl_key(b'H') => {
            buffer.pop();
            PromptState::Active(buffer)
        }
        Key::Byte(127) | Key::Delete => {
            buffer.pop();
            PromptState::Active(buffer)
        }
        Key::Byte(b) if !(b as char).is_ascii_control() => {
            buffer.push(b as char);
            PromptState::Active(buffer)
        }
        _ => PromptState::Active(buffer),
    }
}

/// Pretty-print a byte count, e.g. `1.50kB`.
fn format_size(n: u64) -> String {
    let steps = successors(Some((n, 0u32)), |&(q, _)| (q >= 1024).then(|| (q / 1024, q % 1024)));
    let ((q, r), exp) = steps.enumerate().map(|(i, qr)| (qr, i as u32)).last().unwrap();
    let prefixes = ["", "k", "M", "G", "T", "P"];
    let prefix = prefixes[(exp as usize).min(prefixes.len() - 1)];
    if prefix.is_empty() {
        format!("{q}B")
    } else {
        format!("{:.2}{}B", q as f64 + r as f64 / 1024.0, prefix)
    }
}

const fn ctrl_key(c: u8) -> u8 { c & 0x1f }

/// The text editor: raw-mode terminal, row store, cursor, and the modal prompt/find state.
pub struct Editor {
    _raw_mode: RawModeGuard,
    cursor: CursorState,
    screen_rows: usize,
    screen_cols: usize,
    rows: Vec<Row>,
    dirty: usize,
    quit_times: usize,
    file_name: Option<PathBuf>,
    status_msg: Option<StatusMessage>,
    syntax: Option<&'static SyntaxConf>,
    prompt_mode: Option<PromptMode>,
    config: Config,
}

impl Editor {
    /// Enter raw mode and query the initial window size. Does not yet load a file; call `run`
    /// for that.
    pub fn new(config: Config) -> Result<Self, Error> {
        let raw_mode = RawModeGuard::new()?;
        let mut editor = Self {
            _raw_mode: raw_mode,
            cursor: CursorState::default(),
            screen_rows: 0,
            screen_cols: 0,
            rows: Vec::new(),
            dirty: 0,
            quit_times: config.quit_times,
            file_name: None,
            status_msg: Some(StatusMessage::new(HELP_MESSAGE.to_string())),
            syntax: None,
            prompt_mode: None,
            config,
        };
        editor.update_window_size()?;
        Ok(editor)
    }

    fn current_row(&self) -> Option<&Row> { self.rows.get(self.cursor.y) }

    fn rx(&self) -> usize {
        self.current_row().map_or(0, |row| row.cx_to_rx(self.cursor.x, self.config.tab_stop))
    }

    fn update_window_size(&mut self) -> Result<(), Error> {
        let (rows, cols) = terminal::get_window_size()?;
        self.screen_rows = rows.saturating_sub(2);
        self.screen_cols = cols;
        Ok(())
    }

    fn select_syntax_highlight(&mut self, path: &Path) {
        self.syntax =
            path.extension().and_then(std::ffi::OsStr::to_str).and_then(SyntaxConf::for_extension);
    }

    /// Recompute `render`/`hl` for one row. Highlighting has no cross-row state in this editor
    /// (see `row.rs`), so there is nothing further to propagate to later rows.
    fn update_row(&mut self, y: usize) {
        if let Some(row) = self.rows.get_mut(y) {
            row.update(self.syntax, self.config.tab_stop);
        }
    }

    // ---- Row Store (4.C) ----

    fn insert_row(&mut self, at: usize, text: Vec<u8>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text));
        self.update_row(at);
        self.dirty += 1;
    }

    fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    // ---- Edit Operations (4.H) ----

    fn insert_char(&mut self, b: u8) {
        if self.cursor.y == self.rows.len() {
            self.insert_row(self.rows.len(), Vec::new());
        }
        let syntax = self.syntax;
        let tab_stop = self.config.tab_stop;
        self.rows[self.cursor.y].insert_char(self.cursor.x, b, syntax, tab_stop);
        self.cursor.x += 1;
        self.dirty += 1;
    }

    fn insert_newline(&mut self) {
        if self.cursor.x == 0 {
            self.insert_row(self.cursor.y, Vec::new());
        } else {
            let tail = self.rows[self.cursor.y].text.split_off(self.cursor.x);
            self.update_row(self.cursor.y);
            self.insert_row(self.cursor.y + 1, tail);
        }
        self.cursor.y += 1;
        self.cursor.x = 0;
        self.dirty += 1;
    }

    fn delete_char(&mut self) {
        if self.cursor.y >= self.rows.len() {
            return;
        }
        if self.cursor.x == 0 && self.cursor.y == 0 {
            return;
        }
        let syntax = self.syntax;
        let tab_stop = self.config.tab_stop;
        if self.cursor.x > 0 {
            self.rows[self.cursor.y].delete_char(self.cursor.x - 1, syntax, tab_stop);
            self.cursor.x -= 1;
        } else {
            let prev_len = self.rows[self.cursor.y - 1].text.len();
            let text = self.rows[self.cursor.y].text.clone();
            self.rows[self.cursor.y - 1].append_bytes(&text, syntax, tab_stop);
            self.delete_row(self.cursor.y);
            self.cursor.y -= 1;
            self.cursor.x = prev_len;
        }
        self.dirty += 1;
    }

    // ---- Cursor & Motions (4.G) ----

    fn move_cursor(&mut self, key: AKey) {
        match key {
            AKey::Left if self.cursor.x > 0 => self.cursor.x -= 1,
            AKey::Left if self.cursor.y > 0 => {
                self.cursor.y -= 1;
                self.cursor.x = self.rows[self.cursor.y].text.len();
            }
            AKey::Right => match self.current_row() {
                Some(row) if self.cursor.x < row.text.len() => self.cursor.x += 1,
                Some(_) => {
                    self.cursor.y += 1;
                    self.cursor.x = 0;
                }
                None => {}
            },
            AKey::Up if self.cursor.y > 0 => self.cursor.y -= 1,
            AKey::Down if self.cursor.y < self.rows.len() => self.cursor.y += 1,
            _ => {}
        }
        self.clamp_cursor_x();
    }

    fn clamp_cursor_x(&mut self) {
        self.cursor.x = self.cursor.x.min(self.current_row().map_or(0, |row| row.text.len()));
    }

    // ---- File I/O (4.E) ----

    /// Load `path` into the (empty) row store. A `NotFound` error starts an empty buffer instead
    /// of failing, matching every file-loading port in this corpus; every other I/O error is
    /// fatal at startup.
    fn load(&mut self, path: &Path) -> Result<(), Error> {
        self.select_syntax_highlight(path);
        match File::open(path) {
            Ok(file) => {
                let mut content = Vec::new();
                std::io::BufReader::new(file).read_to_end(&mut content)?;
                if content.is_empty() {
                    self.rows.push(Row::new(Vec::new()));
                } else {
                    let trailing_newline = content.ends_with(b"\n");
                    let mut lines: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
                    if trailing_newline {
                        lines.pop();
                    }
                    for line in lines {
                        let line = line.strip_suffix(b"\r").unwrap_or(line);
                        self.rows.push(Row::new(line.to_vec()));
                    }
                    if trailing_newline {
                        self.rows.push(Row::new(Vec::new()));
                    }
                }
                for y in 0..self.rows.len() {
                    self.update_row(y);
                }
                self.dirty = 0;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.rows.push(Row::new(Vec::new()));
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn rows_to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for row in &self.rows {
            buf.extend_from_slice(&row.text);
            buf.push(b'\n');
        }
        buf
    }

    /// Truncate the target file to the serialized length, then write exactly those bytes. See the
    /// Design Notes for why this is truncate-then-write rather than temp-and-rename.
    fn save_to(&self, path: &Path) -> Result<usize, std::io::Error> {
        let bytes = self.rows_to_bytes();
        let mut file = OpenOptions::new().read(true).write(true).create(true).open(path)?;
        file.set_len(bytes.len() as u64)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        Ok(bytes.len())
    }

    fn save_and_report(&mut self, path: PathBuf) {
        match self.save_to(&path) {
            Ok(n) => {
                self.dirty = 0;
                set_status!(self, "{} written to {}", format_size(n as u64), path.display());
                self.file_name = Some(path);
            }
            Err(err) => set_status!(self, "Can't save! I/O error: {err}"),
        }
    }

    fn save_as(&mut self, path_str: String) {
        let path = PathBuf::from(path_str);
        self.select_syntax_highlight(&path);
        self.save_and_report(path);
        for y in 0..self.rows.len() {
            self.update_row(y);
        }
    }

    // ---- Prompt & Find (4.I) ----

    /// Search `query` starting at `last_match + direction`, wrapping modulo the row count.
    fn find_step(&mut self, query: &str, session: &mut FindSession) {
        session.restore_hl(&mut self.rows);
        if self.rows.is_empty() || query.is_empty() {
            return;
        }
        let numrows = self.rows.len();
        let mut current = session.last_match.unwrap_or(numrows - 1) as isize;
        for _ in 0..numrows {
            current += session.direction;
            if current < 0 {
                current = numrows as isize - 1;
            } else if current >= numrows as isize {
                current = 0;
            }
            let idx = current as usize;
            if let Some(rx) = self.rows[idx].find(query.as_bytes()) {
                session.last_match = Some(idx);
                self.cursor.y = idx;
                self.cursor.x = self.rows[idx].rx_to_cx(rx, self.config.tab_stop);
                self.cursor.roff = self.rows.len();

                let row = &mut self.rows[idx];
                session.saved_hl = Some((idx, row.hl.clone()));
                for hl in &mut row.hl[rx..rx + query.len()] {
                    *hl = HlType::Match;
                }
                return;
            }
        }
    }

    // ---- View / Renderer (4.F) ----

    fn scroll(&mut self) {
        let rx = self.rx();
        if self.cursor.y < self.cursor.roff {
            self.cursor.roff = self.cursor.y;
        } else if self.cursor.y >= self.cursor.roff + self.screen_rows {
            self.cursor.roff = self.cursor.y - self.screen_rows + 1;
        }
        if rx < self.cursor.coff {
            self.cursor.coff = rx;
        } else if rx >= self.cursor.coff + self.screen_cols {
            self.cursor.coff = rx - self.screen_cols + 1;
        }
    }

    fn draw_rows(&self, buf: &mut String) {
        let row_it = self.rows.iter().map(Some).chain(repeat(None)).enumerate();
        for (i, row) in row_it.skip(self.cursor.roff).take(self.screen_rows) {
            match row {
                Some(row) => self.draw_row(row, buf),
                None => {
                    let is_empty_buffer = self.rows.len() <= 1 && self.rows.first().map_or(true, |r| r.text.is_empty());
                    if is_empty_buffer && i == self.screen_rows / 3 {
                        let welcome = format!("kibi-rs editor -- version {}", env!("CARGO_PKG_VERSION"));
                        let welcome_len = welcome.len().min(self.screen_cols);
                        let padding = self.screen_cols.saturating_sub(welcome_len) / 2;
                        if padding > 0 {
                            buf.push('~');
                        }
                        buf.push_str(&" ".repeat(padding.saturating_sub(1)));
                        buf.push_str(&welcome[..welcome_len]);
                    } else {
                        buf.push('~');
                    }
                }
            }
            buf.push_str(CLEAR_LINE_RIGHT_OF_CURSOR);
            buf.push_str("\r\n");
        }
    }

    fn draw_row(&self, row: &Row, buf: &mut String) {
        let coff = self.cursor.coff;
        if coff >= row.render.len() {
            return;
        }
        let end = (coff + self.screen_cols).min(row.render.len());
        let mut current_color: Option<u8> = None;
        for (&b, &hl) in row.render[coff..end].iter().zip(&row.hl[coff..end]) {
            match color_code(hl) {
                None => {
                    if current_color.is_some() {
                        buf.push_str(&format!("\x1b[{RESET_FG_COLOR}m"));
                        current_color = None;
                    }
                }
                Some(code) => {
                    if current_color != Some(code) {
                        current_color = Some(code);
                        buf.push_str(&format!("\x1b[{code}m"));
                    }
                }
            }
            buf.push(b as char);
        }
        buf.push_str(&format!("\x1b[{RESET_FG_COLOR}m"));
    }

    fn draw_status_bar(&self, buf: &mut String) {
        let name =
            self.file_name.as_deref().map_or("[No Name]".to_string(), |p| p.display().to_string());
        let modified = if self.dirty > 0 { " (modified)" } else { "" };
        let left = format!("{:.20} - {} lines{}", name, self.rows.len(), modified);

        let filetype = self.syntax.map_or("no filetype", |s| s.name);
        let right = format!("{} | {}:{}", filetype, self.cursor.y + 1, self.rows.len());

        buf.push_str(REVERSE_VIDEO);
        let rw = self.screen_cols.saturating_sub(left.len());
        buf.push_str(&format!("{left}{right:>rw$.rw$}"));
        buf.push_str(RESET_FMT);
        buf.push_str("\r\n");
    }

    fn draw_message_bar(&self, buf: &mut String) {
        buf.push_str(CLEAR_LINE_RIGHT_OF_CURSOR);
        if let Some(sm) = self.status_msg.as_ref() {
            if sm.time.elapsed() < self.config.message_dur {
                buf.push_str(&sm.msg[..sm.msg.len().min(self.screen_cols)]);
            }
        }
    }

    fn refresh_screen(&mut self) -> Result<(), Error> {
        self.scroll();
        let mut buf = String::new();
        buf.push_str(HIDE_CURSOR);
        buf.push_str(MOVE_CURSOR_TO_START);
        self.draw_rows(&mut buf);
        self.draw_status_bar(&mut buf);
        self.draw_message_bar(&mut buf);

        let (cursor_x, cursor_y) = if self.prompt_mode.is_none() {
            (self.rx() - self.cursor.coff + 1, self.cursor.y - self.cursor.roff + 1)
        } else {
            (self.status_msg.as_ref().map_or(1, |sm| sm.msg.len() + 1), self.screen_rows + 2)
        };
        buf.push_str(&format!("\x1b[{cursor_y};{cursor_x}H"));
        buf.push_str(SHOW_CURSOR);

        terminal::print_and_flush(&buf)
    }

    // ---- Dispatcher (4.J) ----

    fn process_keypress(&mut self, key: Key) -> Result<(bool, Option<PromptMode>), Error> {
        let mut quit_times = self.config.quit_times;
        let mut prompt_mode = None;

        match key {
            Key::Arrow(a) => self.move_cursor(a),
            Key::Page(PageKey::Up) => {
                self.cursor.y = self.cursor.roff;
                for _ in 0..self.screen_rows {
                    self.move_cursor(AKey::Up);
                }
            }
            Key::Page(PageKey::Down) => {
                self.cursor.y =
                    (self.cursor.roff + self.screen_rows.saturating_sub(1)).min(self.rows.len());
                for _ in 0..self.screen_rows {
                    self.move_cursor(AKey::Down);
                }
            }
            Key::Home => self.cursor.x = 0,
            Key::End => self.cursor.x = self.current_row().map_or(0, |row| row.text.len()),
            Key::Byte(b'\r') => self.insert_newline(),
            Key::Byte(127) => self.delete_char(),
            Key::Delete => {
                self.move_cursor(AKey::Right);
                self.delete_char();
            }
            Key::Escape => {}
            Key::Byte(b) if b == ctrl_key(b'L') => {}
            Key::Byte(b) if b == ctrl_key(b'H') => self.delete_char(),
            Key::Byte(b) if b == ctrl_key(b'Q') => {
                if self.dirty > 0 && self.quit_times > 0 {
                    let word = if self.quit_times == 1 { "time" } else { "times" };
                    set_status!(
                        self,
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more {word} to quit.",
                        self.quit_times
                    );
                    quit_times = self.quit_times - 1;
                } else {
                    return Ok((true, None));
                }
            }
            Key::Byte(b) if b == ctrl_key(b'S') => match self.file_name.clone() {
                Some(path) => self.save_and_report(path),
                None => prompt_mode = Some(PromptMode::Save(String::new())),
            },
            Key::Byte(b) if b == ctrl_key(b'F') => {
                prompt_mode =
                    Some(PromptMode::Find(String::new(), self.cursor.clone(), FindSession::new()))
            }
            Key::Byte(b) => self.insert_char(b),
        }

        self.quit_times = quit_times;
        Ok((false, prompt_mode))
    }

    fn process_prompt_keypress(
        &mut self,
        mode: PromptMode,
        key: Key,
    ) -> Result<Option<PromptMode>, Error> {
        self.status_msg = None;
        match mode {
            PromptMode::Save(buf) => match process_prompt_keypress(buf, key) {
                PromptState::Active(buf) => return Ok(Some(PromptMode::Save(buf))),
                PromptState::Cancelled => set_status!(self, "Save aborted"),
                PromptState::Completed(path) => self.save_as(path),
            },
            PromptMode::Find(buf, saved_cursor, mut session) => {
                match process_prompt_keypress(buf, key) {
                    PromptState::Active(query) => {
                        session.direction = match key {
                            Key::Arrow(AKey::Right | AKey::Down) => 1,
                            Key::Arrow(AKey::Left | AKey::Up) => -1,
                            _ => 1,
                        };
                        if !matches!(key, Key::Arrow(_)) {
                            session.last_match = None;
                            session.direction = 1;
                        }
                        self.find_step(&query, &mut session);
                        return Ok(Some(PromptMode::Find(query, saved_cursor, session)));
                    }
                    PromptState::Cancelled => {
                        session.restore_hl(&mut self.rows);
                        self.cursor = saved_cursor;
                    }
                    PromptState::Completed(_) => {
                        session.restore_hl(&mut self.rows);
                    }
                }
            }
        }
        Ok(None)
    }

    /// Load `file_name` (if given) and run the read-dispatch-redraw loop until the user quits.
    pub fn run(&mut self, file_name: Option<PathBuf>) -> Result<(), Error> {
        if let Some(path) = file_name.clone() {
            self.load(&path)?;
        } else {
            self.rows.push(Row::new(Vec::new()));
        }
        self.file_name = file_name;

        loop {
            if sys::has_window_size_changed() {
                self.update_window_size()?;
            }
            if let Some(mode) = self.prompt_mode.as_ref() {
                set_status!(self, "{}", mode.status_msg());
            }
            self.refresh_screen()?;
            let key = terminal::read_key()?;

            self.prompt_mode = match self.prompt_mode.take() {
                None => match self.process_keypress(key)? {
                    (true, _) => return Ok(()),
                    (false, mode) => mode,
                },
                Some(mode) => self.process_prompt_keypress(mode, key)?,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_texts(editor: &Editor) -> Vec<Vec<u8>> {
        editor.rows.iter().map(|r| r.text.clone()).collect()
    }

    fn bare_editor() -> Editor {
        // Builds an Editor without going through `new`/raw mode, for pure logic tests.
        Editor {
            _raw_mode: RawModeGuard::noop(),
            cursor: CursorState::default(),
            screen_rows: 20,
            screen_cols: 80,
            rows: vec![Row::new(Vec::new())],
            dirty: 0,
            quit_times: 1,
            file_name: None,
            status_msg: None,
            syntax: None,
            prompt_mode: None,
            config: Config::default(),
        }
    }

    #[test]
    fn insert_newline_splits_row() {
        let mut ed = bare_editor();
        ed.rows = vec![Row::new(b"hello world".to_vec())];
        ed.cursor.x = 5;
        ed.insert_newline();
        assert_eq!(row_texts(&ed), vec![b"hello".to_vec(), b" world".to_vec()]);
        assert_eq!((ed.cursor.x, ed.cursor.y), (0, 1));
    }

    #[test]
    fn backspace_joins_rows() {
        let mut ed = bare_editor();
        ed.rows = vec![Row::new(b"ab".to_vec()), Row::new(b"cd".to_vec())];
        ed.cursor = CursorState { x: 0, y: 1, roff: 0, coff: 0 };
        ed.delete_char();
        assert_eq!(row_texts(&ed), vec![b"abcd".to_vec()]);
        assert_eq!((ed.cursor.x, ed.cursor.y), (2, 0));
    }

    #[test]
    fn insert_char_past_last_row_creates_row() {
        let mut ed = bare_editor();
        ed.rows = Vec::new();
        ed.cursor = CursorState::default();
        ed.insert_char(b'x');
        assert_eq!(row_texts(&ed), vec![b"x".to_vec()]);
    }

    #[test]
    fn find_step_sets_match_highlight() {
        let mut ed = bare_editor();
        ed.syntax = SyntaxConf::for_extension("c");
        ed.rows = vec![Row::new(b"int x = 12345;".to_vec())];
        ed.update_row(0);
        let mut session = FindSession::new();
        ed.find_step("345", &mut session);
        assert_eq!(ed.cursor.y, 0);
        let rx = ed.rows[0].find(b"345").unwrap();
        assert!(ed.rows[0].hl[rx..rx + 3].iter().all(|&h| h == HlType::Match));
        session.restore_hl(&mut ed.rows);
        assert!(ed.rows[0].hl[rx..rx + 3].iter().all(|&h| h == HlType::Number));
    }

    #[test]
    fn format_size_picks_unit() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.00kB");
    }

    #[test]
    fn load_then_save_round_trips_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.c");
        std::fs::write(&path, b"int x = 1;\nsecond line\r\n").unwrap();

        let mut ed = bare_editor();
        ed.rows.clear();
        ed.load(&path).unwrap();
        assert_eq!(row_texts(&ed), vec![b"int x = 1;".to_vec(), b"second line".to_vec()]);
        assert_eq!(ed.dirty, 0);
        assert!(ed.syntax.is_some(), "`.c` extension should select the C syntax descriptor");

        let n = ed.save_to(&path).unwrap();
        let saved = std::fs::read(&path).unwrap();
        assert_eq!(saved, b"int x = 1;\nsecond line\n");
        assert_eq!(n, saved.len());
    }

    #[test]
    fn missing_file_starts_an_empty_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");

        let mut ed = bare_editor();
        ed.rows.clear();
        ed.load(&path).unwrap();
        assert_eq!(row_texts(&ed), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn save_reports_error_and_keeps_dirty_on_failure() {
        let mut ed = bare_editor();
        ed.dirty = 3;
        // A path whose parent directory does not exist can never be opened for write.
        let bogus = PathBuf::from("/nonexistent-dir-for-test/out.txt");
        ed.save_and_report(bogus);
        assert_eq!(ed.dirty, 3);
        assert!(ed.status_msg.is_some());
    }
}
