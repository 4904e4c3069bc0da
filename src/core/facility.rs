//! Facility handles
//!
//! A facility is a named logical subsystem with its own severity threshold.
//! Handles are cheap to clone and share the engine behind them; the empty
//! name is the standard facility whose tag is omitted from formatted lines.

use super::config::CallerMode;
use super::error::Result;
use super::level::Level;
use super::logger::Shared;
use super::redact::Replacer;
use std::panic::Location;
use std::sync::Arc;

/// Handle to a named facility of a [`Logger`](crate::Logger).
///
/// # Example
///
/// ```
/// use facility_logger::{FileConfig, Level, Logger};
///
/// let logger = Logger::new();
/// logger.set_file(FileConfig::buffer_only());
///
/// let db = logger.facility("db");
/// db.message(Level::Notice, "connection pool ready");
/// assert_eq!(db.level(), Level::Debug);
/// ```
#[derive(Clone)]
pub struct Facility {
    shared: Arc<Shared>,
    name: String,
}

impl Facility {
    pub(crate) fn new(shared: Arc<Shared>, name: String) -> Self {
        Self { shared, name }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emit a message at `level`. Suppressed unless the level is at least as
    /// urgent as the facility's current threshold. Never fails: file
    /// problems degrade to ring-buffer and console persistence only.
    #[track_caller]
    pub fn message(&self, level: Level, text: impl AsRef<str>) {
        self.shared
            .emit(&self.name, level, None, Location::caller(), text.as_ref());
    }

    /// Emit using a raw severity code. Negative codes follow the
    /// suppress-duplicate-noise convention: the absolute value is used for
    /// filtering and display.
    #[track_caller]
    pub fn message_code(&self, code: i32, text: impl AsRef<str>) {
        self.shared.emit(
            &self.name,
            Level::from_code(code),
            None,
            Location::caller(),
            text.as_ref(),
        );
    }

    /// Emit with redaction applied to the formatted line.
    #[track_caller]
    pub fn secured_message(&self, level: Level, replacer: &Replacer, text: impl AsRef<str>) {
        self.shared.emit(
            &self.name,
            level,
            Some(replacer),
            Location::caller(),
            text.as_ref(),
        );
    }

    /// Emit with a `[source] ` prefix on the message body.
    #[track_caller]
    pub fn message_with_source(&self, level: Level, source: &str, text: impl AsRef<str>) {
        self.shared.emit(
            &self.name,
            level,
            None,
            Location::caller(),
            &format!("[{}] {}", source, text.as_ref()),
        );
    }

    /// Redacting variant of [`message_with_source`](Self::message_with_source).
    #[track_caller]
    pub fn secured_message_with_source(
        &self,
        level: Level,
        replacer: &Replacer,
        source: &str,
        text: impl AsRef<str>,
    ) {
        self.shared.emit(
            &self.name,
            level,
            Some(replacer),
            Location::caller(),
            &format!("[{}] {}", source, text.as_ref()),
        );
    }

    /// Current severity threshold of this facility.
    #[must_use]
    pub fn level(&self) -> Level {
        self.shared.level_of(&self.name)
    }

    /// Set this facility's level from its textual name; see
    /// [`Logger::set_level`](crate::Logger::set_level).
    #[track_caller]
    pub fn set_level(&self, level_name: &str, mode: CallerMode) -> Result<Level> {
        self.shared
            .set_level(&self.name, level_name, mode, Location::caller())
    }
}
