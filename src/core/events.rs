//! Console events for communication between layers.
//!
//! Events are the primary mechanism for:
//! - Host -> Core: raw input lines and toggle triggers
//! - Core -> Renderer: view changes

use bevy::prelude::*;

use super::{ConsoleView, Severity};

/// Event sent when a line is submitted to the console.
///
/// The line goes through [`ConsoleService::submit`](super::ConsoleService::submit).
///
/// # Examples
///
/// ```ignore
/// fn submit_line(mut events: MessageWriter<ConsoleInputEvent>) {
///     events.write(ConsoleInputEvent::new("/consolelimit 100"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw line.
    pub line: String,
    /// Severity used when the line carries no inline tag.
    pub severity: Severity,
}

impl ConsoleInputEvent {
    /// Create a new input event with [`Severity::Normal`].
    pub fn new(line: impl Into<String>) -> Self {
        Self::with_severity(line, Severity::Normal)
    }

    /// Create a new input event with a default severity.
    pub fn with_severity(line: impl Into<String>, severity: Severity) -> Self {
        Self {
            line: line.into(),
            severity,
        }
    }
}

/// Event requesting one step of the view cycle.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ConsoleToggleEvent;

/// Event sent after the view changed.
#[derive(Message, Debug, Clone, Copy)]
pub struct ConsoleViewChangedEvent {
    /// The view now showing.
    pub view: ConsoleView,
}

impl ConsoleViewChangedEvent {
    /// Create a new view change event.
    pub fn new(view: ConsoleView) -> Self {
        Self { view }
    }
}

/// Plugin that registers all console events.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleToggleEvent>()
            .add_message::<ConsoleViewChangedEvent>();
    }
}
