//! # Facility Logger
//!
//! Process-wide structured logging across named "facilities", each with an
//! independently configurable severity threshold.
//!
//! ## Features
//!
//! - **Multi-facility**: per-subsystem severity thresholds with lazy
//!   registration and level-change notifications
//! - **Daily rotation**: one file per calendar day, rotated on the first
//!   message after a date change
//! - **Never in the way**: file problems degrade silently, the in-memory
//!   ring buffer and console mirror stay authoritative
//! - **Pre-open buffering**: messages logged before a file destination
//!   exists are kept and drained into the first opened file, or into a
//!   crash-dump file at exit

pub mod core;
pub mod cron;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        AlertFn, CallerMode, Facility, FileConfig, Level, Logger, LoggerError, Replacer, Result,
    };
    pub use crate::cron::{CronLog, CronValue};
    pub use crate::sinks::{CaptureSink, ConsoleSink, StdoutSink};
}

pub use crate::core::{
    AlertFn, CallerMode, Facility, FileConfig, Level, Logger, LoggerError, Replacer, Result,
    PRE_OPEN_CAPACITY, RING_CAPACITY, TRUNCATION_MARKER,
};
pub use crate::cron::{CronLog, CronValue};
pub use crate::sinks::{CaptureSink, ConsoleSink, StdoutSink};
