//! Bounded calculation history.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single history line, e.g. `"6 × 7 = 42"` or `"5 Meter = 16.404199 Foot"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The recorded line
    pub text: String,
    /// When the entry was recorded (Unix epoch millis)
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: current_timestamp(),
        }
    }

    /// Creates an entry with an explicit timestamp (for tests)
    #[must_use]
    pub fn with_timestamp(text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}

fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Bounded ring of history lines.
///
/// Oldest entries are evicted once the cap is reached, so a long
/// session cannot grow the persisted record without bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 50;

    /// Creates an empty history with the default cap
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    /// Creates a history with a custom cap
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Records a line, evicting the oldest entry when full
    pub fn record(&mut self, text: impl Into<String>) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry::new(text));
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// The most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_len() {
        let mut h = History::new();
        assert!(h.is_empty());
        h.record("1 + 1 = 2");
        h.record("2 + 2 = 4");
        assert_eq!(h.len(), 2);
        assert_eq!(h.last().unwrap().text, "2 + 2 = 4");
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut h = History::with_capacity(3);
        for i in 0..5 {
            h.record(format!("entry {i}"));
        }
        assert_eq!(h.len(), 3);
        let texts: Vec<_> = h.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn test_default_cap_is_fifty() {
        let mut h = History::new();
        for i in 0..60 {
            h.record(format!("{i}"));
        }
        assert_eq!(h.len(), History::DEFAULT_MAX_ENTRIES);
        assert_eq!(h.iter().next().unwrap().text, "10");
    }

    #[test]
    fn test_iter_rev_newest_first() {
        let mut h = History::new();
        h.record("a");
        h.record("b");
        let texts: Vec<_> = h.iter_rev().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_clear() {
        let mut h = History::new();
        h.record("x");
        h.clear();
        assert!(h.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut h = History::new();
        h.record("6 × 7 = 42");
        let json = serde_json::to_string(&h).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn test_entry_with_timestamp() {
        let e = HistoryEntry::with_timestamp("t", 1234);
        assert_eq!(e.timestamp, 1234);
    }
}
