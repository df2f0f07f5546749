//! Named VT100/ANSI escape sequences shared by the terminal and view layers.
//!
//! Kept as plain `&str` constants rather than an enum: every use site just wants to push bytes
//! into the frame buffer, never to match on which sequence it is.

/// Hide the cursor during a redraw, to avoid it flickering at a stale position.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Show the cursor again once the frame buffer has been written out.
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Move the cursor to the top-left corner (row 1, column 1).
pub const MOVE_CURSOR_TO_START: &str = "\x1b[H";
/// Clear the rest of the current line, from the cursor to the right edge.
pub const CLEAR_LINE_RIGHT_OF_CURSOR: &str = "\x1b[K";
/// Clear the entire screen. Only used as a last resort on a fatal startup/shutdown error.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Switch on reverse video, used for the status bar.
pub const REVERSE_VIDEO: &str = "\x1b[7m";
/// Reset all character attributes (color, reverse video, ...) to the default.
pub const RESET_FMT: &str = "\x1b[m";
/// Request a cursor position report; the terminal replies on stdin with `ESC [ rows ; cols R`.
pub const CURSOR_POSITION_REPORT: &str = "\x1b[6n";
/// Move the cursor as far right and down as the terminal allows, used as a window-size fallback.
pub const MOVE_CURSOR_FAR_BOTTOM_RIGHT: &str = "\x1b[999C\x1b[999B";

/// SGR color code for a given highlight attribute, or `None` for the default foreground color.
pub fn color_code(hl: crate::row::HlType) -> Option<u8> {
    use crate::row::HlType::{Match, Normal, Number, String as Str};
    match hl {
        Normal => None,
        Number => Some(32),
        Str => Some(33),
        Match => Some(31),
    }
}

/// SGR code that resets the foreground color to the terminal default.
pub const RESET_FG_COLOR: u8 = 39;
