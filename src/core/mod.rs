//! Core engine types

pub mod buffers;
pub mod config;
pub mod error;
pub mod facility;
pub mod level;
pub mod logger;
pub mod redact;

pub use buffers::{PRE_OPEN_CAPACITY, RING_CAPACITY, TRUNCATION_MARKER};
pub use config::{CallerMode, FileConfig};
pub use error::{LoggerError, Result};
pub use facility::Facility;
pub use level::Level;
pub use logger::{AlertFn, Logger};
pub use redact::Replacer;
