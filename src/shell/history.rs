//! Bounded input history.
//!
//! A fixed-capacity ring of past input lines. The console records every
//! dispatched line here after execution, regardless of the dispatch
//! outcome; comment lines, empty lines, and the exit directive are not
//! recorded. A line equal to the most recent entry is skipped, so repeating
//! a command does not flood the ring.

use core::fmt;

use heapless::String;

use super::{MAX_HISTORY, MAX_LINE};

/// Fixed-capacity history ring. When full, the oldest entry is evicted.
pub struct History {
    entries: [String<MAX_LINE>; MAX_HISTORY],
    head: usize,
    len: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: core::array::from_fn(|_| String::new()),
            head: 0,
            len: 0,
        }
    }

    /// Record a line. Empty lines and a line equal to the most recent entry
    /// are skipped; lines longer than [`MAX_LINE`] are truncated at a
    /// character boundary.
    pub fn push(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if let Some(last) = self.last() {
            if last == line {
                return;
            }
        }
        let mut entry = String::new();
        for ch in line.chars() {
            if entry.push(ch).is_err() {
                break;
            }
        }
        self.entries[self.head] = entry;
        self.head = (self.head + 1) % MAX_HISTORY;
        if self.len < MAX_HISTORY {
            self.len += 1;
        }
    }

    /// Number of remembered lines.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entry at `index`, where 0 is the oldest surviving line.
    pub fn get(&self, index: usize) -> Option<&str> {
        if index >= self.len {
            return None;
        }
        let oldest = (self.head + MAX_HISTORY - self.len) % MAX_HISTORY;
        Some(self.entries[(oldest + index) % MAX_HISTORY].as_str())
    }

    /// The most recently recorded line.
    pub fn last(&self) -> Option<&str> {
        if self.len == 0 {
            None
        } else {
            self.get(self.len - 1)
        }
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
