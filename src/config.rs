//! # Configuration
//!
//! In-process tunables for the text editor. There is no on-disk format: every value here is a
//! compiled-in default, constructed once in `main` and moved into the `Editor`.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The size of a tab stop, in columns. Must be > 0.
    pub tab_stop: usize,
    /// The number of confirmations needed before quitting, when changes have been made since the
    /// file was last saved.
    pub quit_times: usize,
    /// The duration for which status messages are shown in the message bar.
    pub message_dur: Duration,
}

impl Default for Config {
    /// Default configuration.
    fn default() -> Self {
        Self { tab_stop: 8, quit_times: 1, message_dur: Duration::new(5, 0) }
    }
}
