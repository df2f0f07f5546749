//! # sys (UNIX)
//!
//! UNIX-specific structs and functions. Imported as `sys` on UNIX systems.

use std::sync::atomic::{AtomicBool, Ordering::Relaxed};

// On UNIX systems, termios represents the terminal mode.
pub use libc::termios as TermMode;
use libc::{c_int, sigaction, sighandler_t, winsize, SA_SIGINFO, SIGWINCH};
use libc::{STDIN_FILENO, STDOUT_FILENO, TCSAFLUSH, TIOCGWINSZ, VMIN, VTIME};

use crate::Error;

fn cerr(err: c_int) -> Result<(), Error> {
    match err {
        0..=c_int::MAX => Ok(()),
        _ => Err(std::io::Error::last_os_error().into()),
    }
}

/// Snapshot the current terminal attributes without modifying them.
pub fn term_mode() -> Result<TermMode, Error> {
    let mut term = std::mem::MaybeUninit::uninit();
    cerr(unsafe { libc::tcgetattr(STDIN_FILENO, term.as_mut_ptr()) })?;
    Ok(unsafe { term.assume_init() })
}

/// Apply a (possibly modified) set of terminal attributes.
pub fn set_term_mode(term: &TermMode) -> Result<(), Error> {
    cerr(unsafe { libc::tcsetattr(STDIN_FILENO, TCSAFLUSH, term) })
}

/// Enable raw mode: clear the flags documented in §4.B of the spec, set a 100ms read timeout, and
/// return the *original* attributes so the caller can restore them later.
pub fn enable_raw_mode() -> Result<TermMode, Error> {
    let orig = term_mode()?;
    let mut raw = orig;

    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_cc[VMIN] = 0;
    raw.c_cc[VTIME] = 1;

    set_term_mode(&raw)?;
    Ok(orig)
}

/// Query the window size via `TIOCGWINSZ`. Returns `Err` if the ioctl fails or reports a
/// degenerate (zero) size; the caller falls back to the cursor-position probe in that case.
pub fn get_window_size() -> Result<(usize, usize), Error> {
    let mut ws: winsize = unsafe { std::mem::zeroed() };
    let res = unsafe { libc::ioctl(STDOUT_FILENO, TIOCGWINSZ, &mut ws) };
    if res == -1 || ws.ws_col == 0 {
        return Err(Error::InvalidWindowSize);
    }
    Ok((ws.ws_row as usize, ws.ws_col as usize))
}

/// Read a single byte from stdin. `Ok(None)` means the VTIME read timeout elapsed with no data
/// (the caller should keep waiting); this is not an error.
pub fn read_byte() -> Result<Option<u8>, Error> {
    let mut buf = [0u8; 1];
    let n = unsafe { libc::read(STDIN_FILENO, buf.as_mut_ptr().cast(), 1) };
    match n {
        1 => Ok(Some(buf[0])),
        0 => Ok(None),
        _ => {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                Ok(None)
            } else {
                Err(err.into())
            }
        }
    }
}

/// Set when a `SIGWINCH` has been received and not yet consumed by `has_window_size_changed`.
static WINDOW_SIZE_CHANGED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigwinch(_signum: c_int) {
    WINDOW_SIZE_CHANGED.store(true, Relaxed);
}

/// Install a `SIGWINCH` handler that flags window-size changes for the read loop to pick up.
/// The handler only touches an atomic; the actual re-query and redraw happen cooperatively.
pub fn register_winsize_change_signal_handler() -> Result<(), Error> {
    let mut action: sigaction = unsafe { std::mem::zeroed() };
    action.sa_sigaction = handle_sigwinch as sighandler_t;
    action.sa_flags = SA_SIGINFO;
    cerr(unsafe { sigaction(SIGWINCH, &action, std::ptr::null_mut()) })
}

/// Check and clear the window-size-changed flag.
pub fn has_window_size_changed() -> bool { WINDOW_SIZE_CHANGED.swap(false, Relaxed) }

#[cfg(test)]
mod tests {
    use super::*;

    // `WINDOW_SIZE_CHANGED` is a process-wide static; `serial` keeps this test from racing
    // against any other test that touches it.
    #[serial_test::serial]
    #[test]
    fn flag_is_set_by_handler_and_cleared_on_read() {
        WINDOW_SIZE_CHANGED.store(false, Relaxed);
        handle_sigwinch(SIGWINCH);
        assert!(has_window_size_changed());
        assert!(!has_window_size_changed());
    }
}
