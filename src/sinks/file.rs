//! File sink for the current day's log file
//!
//! Wraps the open file handle either directly or behind a size-buffered
//! writer, depending on the configured buffer size. The engine guards the
//! sink with its own narrow mutex so the periodic flusher only contends with
//! writers for the duration of the actual write.

use std::fs::File;
use std::io::{self, BufWriter, Write};

pub(crate) enum FileSink {
    Direct(File),
    Buffered(BufWriter<File>),
}

impl FileSink {
    /// A zero buffer size selects direct, unbuffered writes.
    pub(crate) fn new(file: File, buffer_size: usize) -> Self {
        if buffer_size > 0 {
            FileSink::Buffered(BufWriter::with_capacity(buffer_size, file))
        } else {
            FileSink::Direct(file)
        }
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            FileSink::Direct(file) => file.write_all(line.as_bytes()),
            FileSink::Buffered(writer) => writer.write_all(line.as_bytes()),
        }
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self {
            FileSink::Direct(file) => file.flush(),
            FileSink::Buffered(writer) => writer.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_direct_write_is_immediate() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("direct.log");
        let file = File::create(&path).expect("Failed to create file");

        let mut sink = FileSink::new(file, 0);
        sink.write_line("hello\n").expect("write failed");

        let content = fs::read_to_string(&path).expect("Failed to read file");
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_buffered_write_needs_flush() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("buffered.log");
        let file = File::create(&path).expect("Failed to create file");

        let mut sink = FileSink::new(file, 64 * 1024);
        sink.write_line("hello\n").expect("write failed");

        let content = fs::read_to_string(&path).expect("Failed to read file");
        assert_eq!(content, "", "line must still sit in the buffer");

        sink.flush().expect("flush failed");
        let content = fs::read_to_string(&path).expect("Failed to read file");
        assert_eq!(content, "hello\n");
    }
}
