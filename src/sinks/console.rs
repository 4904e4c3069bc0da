//! Console sink implementations
//!
//! Every emitted line is mirrored to exactly one console sink, regardless of
//! the file destination state. The last sink set on the logger wins.

use crate::core::level::Level;
use parking_lot::Mutex;
use std::sync::Arc;

/// Pluggable write target for the console mirror of every emitted line.
///
/// `line` arrives fully formatted, end-of-line marker included.
pub trait ConsoleSink: Send {
    fn write_line(&mut self, level: Level, line: &str);
}

/// Standard-output sink, optionally colorizing lines by level.
pub struct StdoutSink {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

impl StdoutSink {
    #[must_use]
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    #[must_use]
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for StdoutSink {
    fn write_line(&mut self, level: Level, line: &str) {
        #[cfg(feature = "console")]
        if self.use_colors {
            use colored::Colorize;
            print!("{}", line.color(level.color_code()));
            return;
        }
        let _ = level;
        print!("{}", line);
    }
}

/// Test sink that captures every mirrored line into a shared vector.
///
/// Clones share the same storage, so tests keep one handle and hand a clone
/// to the logger.
///
/// # Example
///
/// ```
/// use facility_logger::{CaptureSink, FileConfig, Level, Logger};
///
/// let logger = Logger::new();
/// logger.set_file(FileConfig::buffer_only());
/// let sink = CaptureSink::new();
/// logger.set_console_sink(Box::new(sink.clone()));
/// logger.facility("").message(Level::Info, "captured");
/// assert!(sink.lines().last().unwrap().contains("captured"));
/// ```
#[derive(Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl ConsoleSink for CaptureSink {
    fn write_line(&mut self, _level: Level, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}
