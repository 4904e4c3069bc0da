//! Log level table
//!
//! Syslog-style ordered severities. Lower numeric code means higher urgency,
//! so a facility configured at `Debug` also emits everything from `Emerg`
//! through `Debug`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Level {
    /// System is unusable
    Emerg = 0,
    /// Action must be taken immediately
    Alert = 1,
    /// Critical conditions
    Crit = 2,
    /// Error conditions
    Err = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational
    Info = 6,
    /// Debug-level messages
    #[default]
    Debug = 7,
    Trace1 = 8,
    Trace2 = 9,
    Trace3 = 10,
    Trace4 = 11,
    /// Sentinel for unrecognized levels
    Unknown = 12,
}

const LEVELS: [(Level, &str, &str); 13] = [
    (Level::Emerg, "EMERG", "EM"),
    (Level::Alert, "ALERT", "AL"),
    (Level::Crit, "CRIT", "CR"),
    (Level::Err, "ERR", "ER"),
    (Level::Warning, "WARNING", "WA"),
    (Level::Notice, "NOTICE", "NO"),
    (Level::Info, "INFO", "IN"),
    (Level::Debug, "DEBUG", "DE"),
    (Level::Trace1, "TRACE1", "T1"),
    (Level::Trace2, "TRACE2", "T2"),
    (Level::Trace3, "TRACE3", "T3"),
    (Level::Trace4, "TRACE4", "T4"),
    (Level::Unknown, "UNKNOWN", "??"),
];

impl Level {
    /// Parse a level from its long name (`"DEBUG"`) or two-letter short name
    /// (`"DE"`). Matching is case-sensitive and exact; the first table entry
    /// that matches wins. Returns `None` for anything unrecognized.
    #[must_use]
    pub fn parse(name: &str) -> Option<Level> {
        LEVELS
            .iter()
            .find(|(_, long, short)| name == *long || name == *short)
            .map(|(level, _, _)| *level)
    }

    #[must_use]
    pub fn long_name(&self) -> &'static str {
        LEVELS[*self as usize].1
    }

    #[must_use]
    pub fn short_name(&self) -> &'static str {
        LEVELS[*self as usize].2
    }

    /// Ordered long names of all real levels, excluding the `Unknown` sentinel.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        LEVELS
            .iter()
            .filter(|(level, _, _)| *level != Level::Unknown)
            .map(|(_, long, _)| *long)
            .collect()
    }

    /// Numeric severity code.
    #[must_use]
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Map a raw severity code back to a level.
    ///
    /// Negative codes are the "suppress duplicate noise" convention used by
    /// the flusher heartbeat: the absolute value is what counts for filtering
    /// and display. Codes outside the defined range map to `Unknown`.
    #[must_use]
    pub fn from_code(code: i32) -> Level {
        let code = code.checked_abs().unwrap_or(i32::MAX);
        LEVELS
            .iter()
            .find(|(level, _, _)| level.code() == code && *level != Level::Unknown)
            .map(|(level, _, _)| *level)
            .unwrap_or(Level::Unknown)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Emerg | Level::Alert | Level::Crit => BrightRed,
            Level::Err => Red,
            Level::Warning => Yellow,
            Level::Notice | Level::Info => Green,
            Level::Debug => Blue,
            Level::Trace1 | Level::Trace2 | Level::Trace3 | Level::Trace4 => BrightBlack,
            Level::Unknown => White,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_name())
    }
}

impl FromStr for Level {
    // Written out in full: `Self::Err` would collide with the `Err` variant.
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        Level::parse(s).ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short() {
        assert_eq!(Level::parse("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::parse("DE"), Some(Level::Debug));
        assert_eq!(Level::parse("EMERG"), Some(Level::Emerg));
        assert_eq!(Level::parse("T3"), Some(Level::Trace3));
        assert_eq!(Level::parse("debug"), None);
        assert_eq!(Level::parse(""), None);
        assert_eq!(Level::parse("bogus"), None);
    }

    #[test]
    fn test_names_exclude_unknown() {
        let names = Level::names();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "EMERG");
        assert_eq!(names[11], "TRACE4");
        assert!(!names.contains(&"UNKNOWN"));
    }

    #[test]
    fn test_from_code_abs_and_clamp() {
        assert_eq!(Level::from_code(6), Level::Info);
        assert_eq!(Level::from_code(-6), Level::Info);
        assert_eq!(Level::from_code(0), Level::Emerg);
        assert_eq!(Level::from_code(99), Level::Unknown);
        assert_eq!(Level::from_code(12), Level::Unknown);
    }

    #[test]
    fn test_ordering() {
        assert!(Level::Emerg < Level::Err);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Trace4 < Level::Unknown);
    }

    #[test]
    fn test_display_matches_long_name() {
        assert_eq!(format!("{}", Level::Warning), "WARNING");
        assert_eq!(Level::Unknown.short_name(), "??");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("WARNING".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("ER".parse::<Level>(), Ok(Level::Err));
        assert!("warning".parse::<Level>().is_err());
    }
}
