//! Bridge from an external log stream into the console.
//!
//! Producers publish [`LogEvent`]s to a [`LogSource`] from any thread. While a
//! [`LogSourceBridge`] is subscribed, events travel over a channel and are
//! converted into console lines when the owner drains them; otherwise they are
//! dropped on the spot.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::Severity;

/// Level of an external log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    /// An error.
    Error,
    /// A failed assertion.
    Assert,
    /// A warning.
    Warning,
    /// Regular output.
    #[default]
    Log,
    /// An uncaught exception or panic.
    Exception,
}

impl LogLevel {
    /// Get the display name for this level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Assert => "Assert",
            LogLevel::Warning => "Warning",
            LogLevel::Log => "Log",
            LogLevel::Exception => "Exception",
        }
    }

    /// The console severity this level is shown with.
    pub fn severity(&self) -> Severity {
        match self {
            LogLevel::Error | LogLevel::Assert | LogLevel::Exception => Severity::Error,
            LogLevel::Warning => Severity::Warning,
            LogLevel::Log => Severity::Normal,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An event from the external log stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// The log message.
    pub message: String,
    /// Free-form stack text. The first line containing `(at ` is kept as the
    /// event location.
    pub stack_info: String,
    /// The event level.
    pub level: LogLevel,
}

impl LogEvent {
    /// Create a new log event.
    pub fn new(message: impl Into<String>, stack_info: impl Into<String>, level: LogLevel) -> Self {
        Self {
            message: message.into(),
            stack_info: stack_info.into(),
            level,
        }
    }
}

/// Errors raised while turning a [`LogEvent`] into a console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The stack text carries no `(at ` location.
    MissingLocation,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::MissingLocation => write!(f, "stack info has no '(at ' location"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Format an event as `[Level] message (at location)`.
///
/// The location runs from the first `(at ` in the stack text up to the next
/// line break, or to the end of the text when no line break follows.
///
/// # Examples
///
/// ```
/// use bevy_runtime_console::core::{format_log_event, LogEvent, LogLevel};
///
/// let event = LogEvent::new("boom", "game::update\n(at src/game.rs:12)\n", LogLevel::Error);
/// assert_eq!(format_log_event(&event).unwrap(), "[Error] boom (at src/game.rs:12)");
/// ```
pub fn format_log_event(event: &LogEvent) -> Result<String, FormatError> {
    let start = event
        .stack_info
        .find("(at ")
        .ok_or(FormatError::MissingLocation)?;
    let tail = &event.stack_info[start..];
    let location = tail.find('\n').map_or(tail, |end| &tail[..end]);

    Ok(format!("[{}] {} {}", event.level, event.message, location))
}

/// Convert an event into the console line and severity it is shown with.
///
/// Never fails: a formatting error becomes an Error line describing it.
pub fn convert_log_event(event: &LogEvent) -> (String, Severity) {
    match format_log_event(event) {
        Ok(text) => (text, event.level.severity()),
        Err(err) => (
            format!(
                "[{}] {} (from Console on Receiving Log Message)",
                LogLevel::Error,
                err
            ),
            Severity::Error,
        ),
    }
}

/// Events a subscriber can hold before it is drained. Later events are
/// dropped until the owner drains again.
pub const MAX_PENDING_EVENTS: usize = 4096;

/// Publishing end of the log stream.
///
/// Cheap to clone; every clone feeds the same subscriber. Inserted as a
/// resource so capture layers and the console plugin can find each other.
#[derive(Resource, Clone, Default)]
pub struct LogSource {
    subscriber: Arc<Mutex<Option<SyncSender<LogEvent>>>>,
}

impl LogSource {
    /// Create a source with no subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event.
    ///
    /// Dropped when nobody is subscribed, or when the subscriber already holds
    /// [`MAX_PENDING_EVENTS`] undrained events. Never blocks.
    pub fn publish(&self, event: LogEvent) {
        let Ok(subscriber) = self.subscriber.lock() else {
            return;
        };
        if let Some(sender) = subscriber.as_ref() {
            let _ = sender.try_send(event);
        }
    }

    /// Check if a subscriber is attached.
    pub fn has_subscriber(&self) -> bool {
        self.subscriber
            .lock()
            .map(|subscriber| subscriber.is_some())
            .unwrap_or(false)
    }

    fn attach(&self) -> Receiver<LogEvent> {
        let (sender, receiver) = mpsc::sync_channel(MAX_PENDING_EVENTS);
        if let Ok(mut subscriber) = self.subscriber.lock() {
            *subscriber = Some(sender);
        }
        receiver
    }

    fn detach(&self) {
        if let Ok(mut subscriber) = self.subscriber.lock() {
            *subscriber = None;
        }
    }
}

impl std::fmt::Debug for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSource")
            .field("subscribed", &self.has_subscriber())
            .finish()
    }
}

/// Receiving end of the log stream, owned by the console.
#[derive(Debug)]
pub struct LogSourceBridge {
    source: LogSource,
    receiver: Mutex<Option<Receiver<LogEvent>>>,
}

impl LogSourceBridge {
    /// Create an unsubscribed bridge over `source`.
    pub fn new(source: LogSource) -> Self {
        Self {
            source,
            receiver: Mutex::new(None),
        }
    }

    /// The source this bridge listens to.
    pub fn source(&self) -> &LogSource {
        &self.source
    }

    /// Start receiving events. No-op when already subscribed.
    pub fn subscribe(&mut self) {
        let receiver = self.receiver.get_mut().unwrap_or_else(|e| e.into_inner());
        if receiver.is_none() {
            *receiver = Some(self.source.attach());
        }
    }

    /// Stop receiving events. Pending events are discarded.
    pub fn unsubscribe(&mut self) {
        let receiver = self.receiver.get_mut().unwrap_or_else(|e| e.into_inner());
        if receiver.take().is_some() {
            self.source.detach();
        }
    }

    /// Check if the bridge is subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.receiver
            .lock()
            .map(|receiver| receiver.is_some())
            .unwrap_or(false)
    }

    /// Take every pending event, converted into console lines.
    ///
    /// The owner must call this regularly; see [`MAX_PENDING_EVENTS`].
    pub fn drain(&mut self) -> Vec<(String, Severity)> {
        let receiver = self.receiver.get_mut().unwrap_or_else(|e| e.into_inner());
        match receiver.as_ref() {
            Some(receiver) => receiver.try_iter().map(|event| convert_log_event(&event)).collect(),
            None => Vec::new(),
        }
    }
}
