//! Bounded, timestamped log of recent events.

use chrono::Local;
use std::collections::VecDeque;
use std::fmt;

/// Keeps the newest `capacity` event lines, each prefixed with `[HH:MM:SS]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    capacity: usize,
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Rebuild a log from persisted lines (already timestamped), keeping the newest.
    pub fn restore(capacity: usize, entries: impl IntoIterator<Item = String>) -> Self {
        let mut log = Self::new(capacity);
        for entry in entries {
            log.push_raw(entry);
        }
        log
    }

    /// Record an event with the current local time.
    pub fn push(&mut self, event: impl fmt::Display) {
        let line = format!("[{}] {}", Local::now().format("%H:%M:%S"), event);
        self.push_raw(line);
    }

    fn push_raw(&mut self, line: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Newest first, for display.
    pub fn newest_first(&self) -> impl Iterator<Item = &str> {
        self.entries().rev()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
