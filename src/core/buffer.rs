//! Bounded, ordered store of console lines.
//!
//! The buffer keeps the newest `limit` entries and evicts from the head as
//! soon as an append or a limit change pushes it over capacity.

use std::collections::VecDeque;

/// Default number of lines kept by a [`LogBuffer`].
pub const DEFAULT_LIMIT: usize = 50;

/// Classification of a console line.
///
/// Severity only drives presentation; the console never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Plain output.
    #[default]
    Normal,
    /// Error output.
    Error,
    /// Warning output.
    Warning,
}

impl Severity {
    /// Severity selected by an inline `#<digit> ` tag, if the digit is known.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            '0' => Some(Severity::Normal),
            '1' => Some(Severity::Error),
            '2' => Some(Severity::Warning),
            _ => None,
        }
    }

    /// Get the display name for this severity.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    text: String,
    severity: Severity,
}

impl LogEntry {
    /// Create a new entry.
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    /// The line text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line severity.
    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Fixed-capacity FIFO of [`LogEntry`] values.
///
/// Index 0 is the oldest surviving entry.
///
/// # Examples
///
/// ```
/// use bevy_runtime_console::core::{LogBuffer, LogEntry, Severity};
///
/// let mut buffer = LogBuffer::new(2);
/// buffer.append(LogEntry::new("a", Severity::Normal));
/// buffer.append(LogEntry::new("b", Severity::Normal));
/// buffer.append(LogEntry::new("c", Severity::Error));
///
/// assert_eq!(buffer.len(), 2);
/// assert_eq!(buffer.get(0).map(|e| e.text()), Some("b"));
/// ```
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    limit: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl LogBuffer {
    /// Create an empty buffer. A zero limit is raised to 1.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Append an entry at the tail, evicting the oldest entries if needed.
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        self.evict();
    }

    /// Current capacity.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the capacity and evict immediately. A zero limit is raised to 1.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.evict();
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entry at `index`, or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the buffer holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    fn evict(&mut self) {
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }
}

impl std::ops::Index<usize> for LogBuffer {
    type Output = LogEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(buffer: &LogBuffer) -> Vec<&str> {
        buffer.iter().map(LogEntry::text).collect()
    }

    #[test]
    fn test_append_keeps_newest_in_order() {
        let mut buffer = LogBuffer::new(3);

        for (i, line) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
            buffer.append(LogEntry::new(line, Severity::Normal));
            assert!(buffer.len() <= buffer.limit());
            assert_eq!(buffer.len(), (i + 1).min(3));
        }

        assert_eq!(texts(&buffer), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_default_limit() {
        let buffer = LogBuffer::default();
        assert_eq!(buffer.limit(), DEFAULT_LIMIT);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_set_limit_evicts_immediately() {
        let mut buffer = LogBuffer::new(10);
        for i in 0..10 {
            buffer.append(LogEntry::new(i.to_string(), Severity::Normal));
        }

        buffer.set_limit(4);
        assert_eq!(buffer.len(), 4);
        assert_eq!(texts(&buffer), vec!["6", "7", "8", "9"]);

        // Raising the limit does not bring anything back.
        buffer.set_limit(20);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_zero_limit_clamps_to_one() {
        let mut buffer = LogBuffer::new(0);
        assert_eq!(buffer.limit(), 1);

        buffer.set_limit(5);
        buffer.append(LogEntry::new("x", Severity::Normal));
        buffer.append(LogEntry::new("y", Severity::Warning));
        buffer.set_limit(0);

        assert_eq!(buffer.limit(), 1);
        assert_eq!(texts(&buffer), vec!["y"]);
        assert_eq!(buffer[0].severity(), Severity::Warning);
    }

    #[test]
    fn test_clear_and_out_of_range() {
        let mut buffer = LogBuffer::new(4);
        buffer.append(LogEntry::new("a", Severity::Error));
        assert!(buffer.get(1).is_none());

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.get(0).is_none());
        assert_eq!(buffer.limit(), 4);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let buffer = LogBuffer::new(4);
        let _ = &buffer[0];
    }

    #[test]
    fn test_severity_tags() {
        assert_eq!(Severity::from_tag('0'), Some(Severity::Normal));
        assert_eq!(Severity::from_tag('1'), Some(Severity::Error));
        assert_eq!(Severity::from_tag('2'), Some(Severity::Warning));
        assert_eq!(Severity::from_tag('9'), None);
        assert_eq!(Severity::default(), Severity::Normal);
    }
}
