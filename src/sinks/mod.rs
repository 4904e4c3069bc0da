//! Output sinks

pub mod console;
pub mod file;

pub use console::{CaptureSink, ConsoleSink, StdoutSink};

pub(crate) use file::FileSink;
