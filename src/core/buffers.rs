//! In-memory message buffers
//!
//! Two fixed-capacity holding areas for formatted lines: the ring buffer of
//! most recent messages (always fed, used for introspection) and the pre-open
//! buffer that collects lines while no log file destination exists yet.

use std::collections::VecDeque;

/// Capacity of the most-recent-messages ring.
pub const RING_CAPACITY: usize = 10;

/// Capacity of the pre-open buffer, marker slot included.
pub const PRE_OPEN_CAPACITY: usize = 500;

/// Marker stored in the final pre-open slot once the buffer overflows.
pub const TRUNCATION_MARKER: &str = "...";

/// Fixed-capacity FIFO of the most recent formatted lines, oldest evicted
/// first.
#[derive(Debug)]
pub(crate) struct RingBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, line: String) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line);
    }

    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Bounded FIFO holding formatted lines until a log file is opened.
///
/// The last slot is reserved for a one-time truncation marker; once the
/// buffer is full everything else is silently dropped. Contents are drained
/// exactly once, into the first successfully opened file (or the crash-dump
/// file at shutdown).
#[derive(Debug)]
pub(crate) struct PreOpenBuffer {
    entries: Vec<String>,
    capacity: usize,
}

impl PreOpenBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, line: String) {
        if self.entries.len() + 1 < self.capacity {
            self.entries.push(line);
        } else if self.entries.len() + 1 == self.capacity {
            let mut marker = TRUNCATION_MARKER.to_string();
            marker.push_str(super::logger::EOL);
            self.entries.push(marker);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[String] {
        &self.entries
    }

    pub(crate) fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.entries)
    }
}
