//! # sys (Windows)
//!
//! Windows-specific structs and functions. Imported as `sys` on Windows systems.
//!
//! There is no `SIGWINCH` equivalent on this platform: `has_window_size_changed` always returns
//! `false`, and a console resize is only picked up on the next redraw that happens for another
//! reason (e.g. the next keystroke).

use std::io;

use winapi::um::wincon::{
    ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT, ENABLE_PROCESSED_INPUT, ENABLE_PROCESSED_OUTPUT,
    ENABLE_QUICK_EDIT_MODE, ENABLE_VIRTUAL_TERMINAL_INPUT, ENABLE_VIRTUAL_TERMINAL_PROCESSING,
};
use winapi_util::console;
use winapi_util::HandleRef;

use crate::Error;

fn stdin_ref() -> HandleRef { HandleRef::from(&io::stdin()) }
fn stdout_ref() -> HandleRef { HandleRef::from(&io::stdout()) }

/// The Windows equivalent of `termios`: the pair of console modes (input, output) that must be
/// restored on exit.
#[derive(Clone, Copy)]
pub struct TermMode {
    input: u32,
    output: u32,
}

/// Snapshot the current console modes without modifying them.
pub fn term_mode() -> Result<TermMode, Error> {
    let input = console::mode(stdin_ref())?;
    let output = console::mode(stdout_ref())?;
    Ok(TermMode { input, output })
}

/// Apply a (possibly modified) set of console modes.
pub fn set_term_mode(term: &TermMode) -> Result<(), Error> {
    console::set_mode(stdin_ref(), term.input)?;
    console::set_mode(stdout_ref(), term.output)?;
    Ok(())
}

/// Enable raw mode: disable line editing, echo and signal generation on input, enable VT100
/// escape processing on both input and output, and return the original modes.
pub fn enable_raw_mode() -> Result<TermMode, Error> {
    let orig = term_mode()?;

    let input = (orig.input
        & !(ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT | ENABLE_PROCESSED_INPUT | ENABLE_QUICK_EDIT_MODE))
        | ENABLE_VIRTUAL_TERMINAL_INPUT;
    let output = orig.output | ENABLE_PROCESSED_OUTPUT | ENABLE_VIRTUAL_TERMINAL_PROCESSING;

    set_term_mode(&TermMode { input, output })?;
    Ok(orig)
}

/// Query the window size via the console screen buffer's current window rectangle.
pub fn get_window_size() -> Result<(usize, usize), Error> {
    let (cols, rows) = console::size(stdout_ref()).map_err(|_| Error::InvalidWindowSize)?;
    if cols == 0 || rows == 0 {
        return Err(Error::InvalidWindowSize);
    }
    Ok((rows as usize, cols as usize))
}

/// Read a single byte from stdin. Blocking reads on a Windows console (with line input disabled)
/// always return at least one byte, so there is no timeout case to model here.
pub fn read_byte() -> Result<Option<u8>, Error> {
    use std::io::Read;
    let mut buf = [0u8; 1];
    match io::stdin().read(&mut buf) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(buf[0])),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// No `SIGWINCH` equivalent is registered on Windows.
pub fn register_winsize_change_signal_handler() -> Result<(), Error> { Ok(()) }

/// Always `false`: window-size changes are only observed via the next unrelated redraw.
pub fn has_window_size_changed() -> bool { false }
