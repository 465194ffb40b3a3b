//! The console service.
//!
//! [`ConsoleService`] owns the log buffer, the command registry and the log
//! bridge, and is the only entry point renderers and hosts talk to. At most
//! one service is alive per process.

use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;

use super::{
    CommandArgs, CommandRegistry, ConsoleState, ConsoleStatus, ConsoleView, DispatchOutcome,
    LogEntry, LogSource, LogSourceBridge, Severity, parse_command, resolve_severity,
};

/// Response buffered when no command handled a prefixed line.
pub const INVALID_COMMAND: &str = "Invalid Command";

/// Number of lines shown by the mini view.
pub const MINI_VIEW_LINES: usize = 2;

static LIVE_INSTANCE: AtomicBool = AtomicBool::new(false);

/// Errors returned by the console service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// Another [`ConsoleService`] is already alive in this process.
    AlreadyInitialized,
    /// A buffer index outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::AlreadyInitialized => {
                write!(f, "a console service already exists in this process")
            }
            ConsoleError::IndexOutOfRange { index, len } => {
                write!(f, "console line {} out of range (len {})", index, len)
            }
        }
    }
}

impl std::error::Error for ConsoleError {}

/// Claim on the process-wide console slot, released on drop.
#[derive(Debug)]
struct InstanceGuard;

impl InstanceGuard {
    fn acquire() -> Result<Self, ConsoleError> {
        LIVE_INSTANCE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InstanceGuard)
            .map_err(|_| ConsoleError::AlreadyInitialized)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        LIVE_INSTANCE.store(false, Ordering::Release);
    }
}

/// Process-wide developer console.
///
/// # Examples
///
/// ```
/// use bevy_runtime_console::core::{
///     CommandRegistry, ConsoleService, LogSource, Severity, builtin_commands,
/// };
///
/// let mut console = ConsoleService::new(
///     "/",
///     50,
///     true,
///     CommandRegistry::new(builtin_commands()),
///     LogSource::new(),
/// )
/// .unwrap();
///
/// console.submit("#2 careful", Severity::Normal);
/// console.submit("/consolelimit 5", Severity::Normal);
///
/// assert_eq!(console.limit(), 5);
/// assert_eq!(console.severity_of(0).unwrap(), Severity::Warning);
/// ```
#[derive(Resource, Debug)]
pub struct ConsoleService {
    state: ConsoleState,
    registry: CommandRegistry,
    bridge: LogSourceBridge,
    _instance: InstanceGuard,
}

impl ConsoleService {
    /// Create the console.
    ///
    /// Fails with [`ConsoleError::AlreadyInitialized`] while another service is
    /// alive. The registry is fixed from here on.
    pub fn new(
        prefix: impl Into<String>,
        capacity: usize,
        enabled: bool,
        registry: CommandRegistry,
        source: LogSource,
    ) -> Result<Self, ConsoleError> {
        let instance = InstanceGuard::acquire()?;

        let mut console = Self {
            state: ConsoleState::new(prefix, capacity),
            registry,
            bridge: LogSourceBridge::new(source),
            _instance: instance,
        };

        if enabled {
            console.enable();
        }

        Ok(console)
    }

    /// Check if a console service is alive in this process.
    pub fn exists() -> bool {
        LIVE_INSTANCE.load(Ordering::Acquire)
    }

    /// Start buffering and listening to the log source.
    pub fn enable(&mut self) {
        if self.state.enable() {
            self.bridge.subscribe();
            info!("Console Enabled");
        }
    }

    /// Stop listening, discard the buffer and hide every view.
    pub fn disable(&mut self) {
        if self.state.disable() {
            self.bridge.unsubscribe();
            debug!("Console Disabled");
        }
    }

    /// Enable or disable. Setting the current value is a no-op.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    /// Whether lines are being buffered.
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ConsoleStatus {
        if self.state.is_enabled() {
            ConsoleStatus::Enabled(self.state.view())
        } else {
            ConsoleStatus::Disabled
        }
    }

    /// Current view. Always [`ConsoleView::Hidden`] while disabled.
    pub fn view(&self) -> ConsoleView {
        self.state.view()
    }

    /// Whether the full view is showing.
    pub fn using_full_view(&self) -> bool {
        self.state.view() == ConsoleView::Full
    }

    /// Whether the mini view is showing.
    pub fn mini_view(&self) -> bool {
        self.state.view() == ConsoleView::Mini
    }

    /// Apply one toggle trigger.
    ///
    /// Returns the new view, or `None` while disabled.
    pub fn toggle(&mut self) -> Option<ConsoleView> {
        self.state.toggle()
    }

    /// Submit a raw input line.
    ///
    /// While enabled the line is buffered (after resolving an inline `#n `
    /// severity tag). Prefixed lines are dispatched as commands even while
    /// disabled; when no handler accepts one, [`INVALID_COMMAND`] is
    /// buffered at Error severity.
    pub fn submit(&mut self, line: &str, default_severity: Severity) -> Option<DispatchOutcome> {
        let (text, severity) = resolve_severity(line, default_severity);
        self.state.echo(text, severity);

        let cmd = parse_command(text, self.state.prefix())?;
        let args = CommandArgs::new(cmd.raw, cmd.args);
        let outcome = self.registry.dispatch(cmd.keyword, &args, &mut self.state);

        if !outcome.is_handled() {
            self.respond(INVALID_COMMAND, Severity::Error);
        }

        Some(outcome)
    }

    /// Buffer a line. Dropped while disabled.
    pub fn respond(&mut self, text: impl Into<String>, severity: Severity) {
        self.state.respond(text, severity);
    }

    /// Move every pending log event into the buffer.
    ///
    /// Returns the number of events consumed.
    pub fn pump_log_events(&mut self) -> usize {
        let lines = self.bridge.drain();
        let count = lines.len();
        for (text, severity) in lines {
            self.state.respond(text, severity);
        }
        count
    }

    /// The log source feeding this console.
    pub fn log_source(&self) -> &LogSource {
        self.bridge.source()
    }

    /// Whether the log bridge is subscribed.
    pub fn is_listening(&self) -> bool {
        self.bridge.is_subscribed()
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Check if no line is buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Line at `index` (0 is the oldest).
    pub fn get(&self, index: usize) -> Result<&LogEntry, ConsoleError> {
        self.state.get(index).ok_or(ConsoleError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Severity of the line at `index`.
    pub fn severity_of(&self, index: usize) -> Result<Severity, ConsoleError> {
        self.get(index).map(LogEntry::severity)
    }

    /// Iterate over buffered lines, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.state.entries()
    }

    /// The newest lines shown by the mini view, oldest first.
    pub fn mini_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries().skip(self.len().saturating_sub(MINI_VIEW_LINES))
    }

    /// Buffer capacity.
    pub fn limit(&self) -> usize {
        self.state.limit()
    }

    /// Change the buffer capacity, evicting immediately. Values below 1 are
    /// raised to 1. Returns the capacity applied.
    pub fn set_limit(&mut self, limit: i64) -> usize {
        self.state.set_limit(limit)
    }

    /// Remove every buffered line.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Whether the renderer should scroll to the bottom. Reading clears it.
    pub fn take_scroll_reset(&mut self) -> bool {
        self.state.take_scroll_reset()
    }

    /// Total number of lines ever buffered.
    ///
    /// Never decreases, so renderers can detect new lines across evictions,
    /// clears and disable/enable cycles.
    pub fn sequence(&self) -> u64 {
        self.state.sequence()
    }

    /// The command prefix.
    pub fn prefix(&self) -> &str {
        self.state.prefix()
    }

    /// The registered commands.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}

impl Drop for ConsoleService {
    fn drop(&mut self) {
        self.bridge.unsubscribe();
    }
}

/// Serializes tests that create a [`ConsoleService`].
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
