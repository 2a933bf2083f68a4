//! Line-oriented logging with timestamps, source locations and ANSI colour.
//!
//! Provides the [`llog!`] macro for consistent log output in the format:
//!
//! ```text
//! 20261019T21:33:12.000 - src/screens/feed.rs:42 - feed: mounted 6 post(s)
//! ```
//!
//! On a terminal, timestamps and source locations are dimmed and user / post
//! ids get a stable colour derived from their value.
//!
//! Log lines go to stderr unless [`set_writer`] installs another destination.
//! Installing a writer also disables colour codes.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};

use chrono::Utc;

static COLOUR_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_WRITER: LazyLock<Mutex<Box<dyn Write + Send>>> =
    LazyLock::new(|| Mutex::new(Box::new(io::stderr())));

/// Detect whether stderr supports colour. Call once at startup.
pub fn init() {
    COLOUR_ENABLED.store(io::stderr().is_terminal(), Ordering::Relaxed);
}

/// Replace the log writer. All subsequent [`llog!`] output goes to `w`.
pub fn set_writer(w: Box<dyn Write + Send>) {
    COLOUR_ENABLED.store(false, Ordering::Relaxed);
    if let Ok(mut writer) = LOG_WRITER.lock() {
        *writer = w;
    }
}

pub fn colour_enabled() -> bool {
    COLOUR_ENABLED.load(Ordering::Relaxed)
}

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

const ID_COLOURS: &[&str] = &[
    "\x1b[91m", "\x1b[92m", "\x1b[93m", "\x1b[94m", "\x1b[95m", "\x1b[96m", "\x1b[31m",
    "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m",
];

fn id_colour(id: u32) -> &'static str {
    let hash = id.wrapping_mul(2_654_435_761);
    ID_COLOURS[(hash as usize) % ID_COLOURS.len()]
}

fn tagged(prefix: &str, id: u32) -> String {
    if colour_enabled() {
        format!("{}{prefix}-{id}{RESET}", id_colour(id))
    } else {
        format!("{prefix}-{id}")
    }
}

/// Format a user id, e.g. `u-101`.
pub fn user_id(id: u32) -> String {
    tagged("u", id)
}

/// Format a post id, e.g. `p-3`.
pub fn post_id(id: u32) -> String {
    tagged("p", id)
}

/// Current wall-clock time as `YYYYMMDDTHH:MM:SS.mmm` (UTC).
pub fn format_timestamp() -> String {
    Utc::now().format("%Y%m%dT%H:%M:%S%.3f").to_string()
}

/// Write a single log line. Called by [`llog!`].
pub fn emit(file: &str, line: u32, msg: &str) {
    let ts = format_timestamp();
    let formatted = if colour_enabled() {
        format!("{DIM}{ts}{RESET} {DIM}{file}:{line}{RESET} {msg}")
    } else {
        format!("{ts} - {file}:{line} - {msg}")
    };
    if let Ok(mut writer) = LOG_WRITER.lock() {
        let _ = writeln!(*writer, "{formatted}");
    }
}

/// Emit a log line with timestamp and source location.
///
/// ```ignore
/// llog!("feed: like on {} -> {}", logging::post_id(id), likes);
/// ```
#[macro_export]
macro_rules! llog {
    ($($arg:tt)*) => {{
        $crate::logging::emit(file!(), line!(), &format!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_id_format() {
        assert!(!colour_enabled());
        assert_eq!(user_id(101), "u-101");
        assert_eq!(post_id(3), "p-3");
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = format_timestamp();
        assert_eq!(ts.len(), "20261019T21:33:12.000".len());
        assert_eq!(&ts[8..9], "T");
    }
}
