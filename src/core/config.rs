//! File destination and caller-tag configuration

use serde::{Deserialize, Serialize};

/// Display mode for the caller-location tag in formatted lines.
///
/// The mode is process-wide, not per-facility, even though it is supplied
/// through the per-facility level setter. `Emerg` messages always carry the
/// full tag regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerMode {
    #[default]
    None,
    /// File name and line only
    Short,
    /// Full path and line
    Full,
}

impl CallerMode {
    /// Parse from the textual form used in configuration. Anything
    /// unrecognized (including the empty string) means `None`.
    #[must_use]
    pub fn parse(s: &str) -> CallerMode {
        match s {
            "short" => CallerMode::Short,
            "full" => CallerMode::Full,
            _ => CallerMode::None,
        }
    }
}

/// File destination settings for [`Logger::set_file`](crate::Logger::set_file).
///
/// An empty `directory` means `./logs/`; the literal `"-"` selects
/// buffer-only mode where no file is ever opened (useful in tests).
///
/// # Example
///
/// ```
/// use facility_logger::FileConfig;
///
/// let config = FileConfig::default()
///     .with_directory("/var/log/myapp")
///     .with_suffix("web")
///     .with_buffer_size(64 * 1024)
///     .with_flush_period_secs(5);
/// assert_eq!(config.suffix, "web");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Target directory, created recursively on first rotation if missing.
    pub directory: String,
    /// Appended to the date stamp in the file name: `<date>-<suffix>.log`.
    pub suffix: String,
    /// Stamp files and messages with local time instead of UTC.
    pub local_time: bool,
    /// Buffer size in bytes for the file writer; 0 means unbuffered writes.
    pub buffer_size: usize,
    /// Flush interval for the background flusher; 0 keeps the 1 second default.
    pub flush_period_secs: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            suffix: String::new(),
            local_time: false,
            buffer_size: 0,
            flush_period_secs: 0,
        }
    }
}

impl FileConfig {
    /// Buffer-only configuration: messages stay in memory, no file is opened.
    #[must_use]
    pub fn buffer_only() -> Self {
        Self {
            directory: "-".to_string(),
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_flush_period_secs(mut self, secs: u64) -> Self {
        self.flush_period_secs = secs;
        self
    }
}
