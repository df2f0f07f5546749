//! # Terminal I/O
//!
//! The platform-agnostic half of the raw-mode/ key-decoding/ window-size layer. The
//! platform-specific half lives in `sys` (aliased to `unix` or `windows`, see `lib.rs`).

use std::io::{self, Read, Write};

use crate::ansi_escape::{
    CLEAR_SCREEN, CURSOR_POSITION_REPORT, MOVE_CURSOR_FAR_BOTTOM_RIGHT, MOVE_CURSOR_TO_START,
};
use crate::sys;
use crate::Error;

/// An arrow key, shared by the plain and Ctrl-modified arrow variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AKey {
    Left,
    Right,
    Up,
    Down,
}

/// A page key (`Page Up` / `Page Down`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Up,
    Down,
}

/// A decoded key. Named keys are their own variants rather than integers ≥ 1000 (the wire-level
/// trick used by C and byte-oriented ports) since a tagged union does the same job natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Byte(u8),
    Arrow(AKey),
    Page(PageKey),
    Home,
    End,
    Delete,
    Escape,
}

/// Acquires raw mode on construction and restores the original terminal attributes when dropped,
/// including during panic unwinding. This replaces a process-exit hook with ordinary RAII.
pub struct RawModeGuard {
    orig: sys::TermMode,
}

impl RawModeGuard {
    pub fn new() -> Result<Self, Error> {
        sys::register_winsize_change_signal_handler()?;
        let orig = sys::enable_raw_mode()?;
        Ok(Self { orig })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = sys::set_term_mode(&self.orig);
    }
}

#[cfg(test)]
impl RawModeGuard {
    /// A guard that restores a zeroed terminal mode on drop, for unit tests that build an
    /// `Editor` without ever touching the real terminal.
    pub(crate) fn noop() -> Self { Self { orig: unsafe { std::mem::zeroed() } } }
}

/// Block until a key is available, decoding ANSI escape sequences. A `SIGWINCH` flag (Unix only)
/// is checked on every iteration by the caller via `sys::has_window_size_changed`; this function
/// only concerns itself with turning bytes into `Key`s.
pub fn read_key() -> Result<Key, Error> {
    loop {
        if let Some(b) = sys::read_byte()? {
            return if b == 0x1b { read_escape_sequence() } else { Ok(Key::Byte(b)) };
        }
    }
}

fn next_byte_or_escape() -> Result<Option<u8>, Error> {
    // A handful of timeouts (VTIME is 100ms) is a generous bound on how long the remaining bytes
    // of one escape sequence can take to arrive once the leading ESC has been read.
    for _ in 0..4 {
        if let Some(b) = sys::read_byte()? {
            return Ok(Some(b));
        }
    }
    Ok(None)
}

fn read_escape_sequence() -> Result<Key, Error> {
    let Some(b1) = next_byte_or_escape()? else { return Ok(Key::Escape) };
    if b1 != b'[' && b1 != b'O' {
        return Ok(Key::Escape);
    }
    let Some(b2) = next_byte_or_escape()? else { return Ok(Key::Escape) };

    if b1 == b'O' {
        return Ok(match b2 {
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => Key::Escape,
        });
    }

    match b2 {
        b'A' => Ok(Key::Arrow(AKey::Up)),
        b'B' => Ok(Key::Arrow(AKey::Down)),
        b'C' => Ok(Key::Arrow(AKey::Right)),
        b'D' => Ok(Key::Arrow(AKey::Left)),
        b'H' => Ok(Key::Home),
        b'F' => Ok(Key::End),
        b'0'..=b'9' => {
            let Some(b3) = next_byte_or_escape()? else { return Ok(Key::Escape) };
            if b3 != b'~' {
                return Ok(Key::Escape);
            }
            Ok(match b2 {
                b'1' | b'7' => Key::Home,
                b'4' | b'8' => Key::End,
                b'3' => Key::Delete,
                b'5' => Key::Page(PageKey::Up),
                b'6' => Key::Page(PageKey::Down),
                _ => Key::Escape,
            })
        }
        _ => Ok(Key::Escape),
    }
}

/// Query the window size. Tries the OS ioctl/console API first; if that fails, falls back to
/// moving the cursor as far right/down as the terminal allows and parsing the resulting
/// cursor-position report.
pub fn get_window_size() -> Result<(usize, usize), Error> {
    match sys::get_window_size() {
        Ok(size) => Ok(size),
        Err(_) => {
            print_and_flush(MOVE_CURSOR_FAR_BOTTOM_RIGHT)?;
            get_cursor_position()
        }
    }
}

/// Request and parse a cursor position report (`ESC[6n` → `ESC[rows;colsR`).
fn get_cursor_position() -> Result<(usize, usize), Error> {
    print_and_flush(CURSOR_POSITION_REPORT)?;

    let mut buf = Vec::with_capacity(32);
    let mut one = [0u8; 1];
    loop {
        let n = io::stdin().read(&mut one)?;
        if n == 0 {
            break;
        }
        if one[0] == b'R' {
            break;
        }
        buf.push(one[0]);
        if buf.len() >= 31 {
            break;
        }
    }

    if buf.first() != Some(&0x1b) || buf.get(1) != Some(&b'[') {
        return Err(Error::CursorPosition);
    }
    let rest = std::str::from_utf8(&buf[2..]).map_err(|_| Error::CursorPosition)?;
    let (rows, cols) = rest.split_once(';').ok_or(Error::CursorPosition)?;
    let rows: usize = rows.parse().map_err(|_| Error::CursorPosition)?;
    let cols: usize = cols.parse().map_err(|_| Error::CursorPosition)?;
    Ok((rows, cols))
}

/// Clear the screen and home the cursor. Called on a fatal startup/shutdown error, so the
/// terminal is left showing a clean slate rather than stale editor content when the process
/// prints its error message and exits.
pub fn clear_screen() -> Result<(), Error> {
    print_and_flush(&format!("{CLEAR_SCREEN}{MOVE_CURSOR_TO_START}"))
}

/// Write `s` to stdout and flush it immediately, so a single redraw is a single syscall-visible
/// write rather than several small ones.
pub fn print_and_flush(s: &str) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    lock.write_all(s.as_bytes())?;
    lock.flush()?;
    Ok(())
}
