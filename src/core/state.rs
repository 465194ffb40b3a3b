//! Mutable console state shared by the service and command handlers.

use super::{LogBuffer, LogEntry, Severity};

/// Which view the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleView {
    /// Nothing on screen.
    #[default]
    Hidden,
    /// A strip with the two newest lines.
    Mini,
    /// The full scrollback with the input field.
    Full,
}

impl ConsoleView {
    /// The view reached by one toggle trigger.
    ///
    /// Hidden goes to Full, Full goes to Mini and Mini goes back to Hidden.
    pub fn next(self) -> Self {
        match self {
            ConsoleView::Hidden => ConsoleView::Full,
            ConsoleView::Full => ConsoleView::Mini,
            ConsoleView::Mini => ConsoleView::Hidden,
        }
    }
}

/// Lifecycle state of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleStatus {
    /// Nothing is buffered and the view is forced hidden.
    Disabled,
    /// Buffering, showing the given view.
    Enabled(ConsoleView),
}

/// Buffer and flags behind a [`ConsoleService`](super::ConsoleService).
///
/// The buffer only exists while the console is enabled. The capacity is kept
/// separately so it survives a disable/enable cycle.
#[derive(Debug)]
pub(crate) struct ConsoleState {
    prefix: String,
    enabled: bool,
    view: ConsoleView,
    capacity: usize,
    buffer: Option<LogBuffer>,
    scroll_reset: bool,
    sequence: u64,
}

impl ConsoleState {
    pub(crate) fn new(prefix: impl Into<String>, capacity: usize) -> Self {
        Self {
            prefix: prefix.into(),
            enabled: false,
            view: ConsoleView::Hidden,
            capacity: capacity.max(1),
            buffer: None,
            scroll_reset: false,
            sequence: 0,
        }
    }

    pub(crate) fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn view(&self) -> ConsoleView {
        self.view
    }

    /// Allocate a fresh buffer. Returns `false` if already enabled.
    pub(crate) fn enable(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        self.view = ConsoleView::Hidden;
        self.buffer = Some(LogBuffer::new(self.capacity));
        true
    }

    /// Discard the buffer and hide every view. Returns `false` if already disabled.
    pub(crate) fn disable(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.enabled = false;
        self.view = ConsoleView::Hidden;
        self.buffer = None;
        self.scroll_reset = false;
        true
    }

    /// Advance the view cycle. Ignored while disabled.
    pub(crate) fn toggle(&mut self) -> Option<ConsoleView> {
        if !self.enabled {
            return None;
        }
        self.view = self.view.next();
        if self.view != ConsoleView::Hidden {
            self.scroll_reset = true;
        }
        Some(self.view)
    }

    /// Buffer a line from user input and request a scroll to the bottom.
    pub(crate) fn echo(&mut self, text: &str, severity: Severity) {
        if self.push(LogEntry::new(text, severity)) {
            self.scroll_reset = true;
        }
    }

    /// Buffer a response line. Dropped while disabled.
    pub(crate) fn respond(&mut self, text: impl Into<String>, severity: Severity) {
        self.push(LogEntry::new(text, severity));
    }

    fn push(&mut self, entry: LogEntry) -> bool {
        match self.buffer.as_mut() {
            Some(buffer) => {
                buffer.append(entry);
                self.sequence += 1;
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.clear();
        }
    }

    pub(crate) fn limit(&self) -> usize {
        self.buffer.as_ref().map_or(self.capacity, LogBuffer::limit)
    }

    pub(crate) fn set_limit(&mut self, limit: i64) -> usize {
        self.capacity = usize::try_from(limit).unwrap_or(0).max(1);
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.set_limit(self.capacity);
        }
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, LogBuffer::len)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&LogEntry> {
        self.buffer.as_ref()?.get(index)
    }

    pub(crate) fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.buffer.iter().flat_map(|buffer| buffer.iter())
    }

    pub(crate) fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset)
    }

    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle() {
        assert_eq!(ConsoleView::Hidden.next(), ConsoleView::Full);
        assert_eq!(ConsoleView::Full.next(), ConsoleView::Mini);
        assert_eq!(ConsoleView::Mini.next(), ConsoleView::Hidden);
    }

    #[test]
    fn test_disabled_state_drops_lines() {
        let mut state = ConsoleState::new("/", 5);
        state.respond("lost", Severity::Normal);
        state.echo("lost too", Severity::Error);

        assert_eq!(state.len(), 0);
        assert_eq!(state.sequence(), 0);
        assert!(!state.take_scroll_reset());
        assert_eq!(state.toggle(), None);
    }

    #[test]
    fn test_enable_disable_are_idempotent() {
        let mut state = ConsoleState::new("/", 5);
        assert!(state.enable());
        assert!(!state.enable());

        state.respond("kept", Severity::Normal);
        assert!(!state.enable());
        assert_eq!(state.len(), 1);

        assert!(state.disable());
        assert!(!state.disable());
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn test_capacity_survives_disable() {
        let mut state = ConsoleState::new("/", 5);
        assert_eq!(state.set_limit(-3), 1);
        assert_eq!(state.limit(), 1);

        state.set_limit(7);
        state.enable();
        assert_eq!(state.limit(), 7);
        state.disable();
        state.enable();
        assert_eq!(state.limit(), 7);
    }

    #[test]
    fn test_echo_requests_scroll_reset_once() {
        let mut state = ConsoleState::new("/", 5);
        state.enable();

        state.respond("response", Severity::Normal);
        assert!(!state.take_scroll_reset());

        state.echo("input", Severity::Normal);
        assert!(state.take_scroll_reset());
        assert!(!state.take_scroll_reset());
        assert_eq!(state.sequence(), 2);
    }
}
