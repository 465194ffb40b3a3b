//! Core console types.
//!
//! This module provides the fundamental building blocks:
//! - [`LogBuffer`] - Bounded, ordered store of console lines
//! - [`CommandRegistry`] - Ordered commands with case-insensitive keywords
//! - [`resolve_severity`] / [`parse_command`] - Input line parsing
//! - [`LogSourceBridge`] - Converts external log events into console lines
//! - [`ConsoleService`] - The process-wide console tying it all together
//! - Events for communication between layers

mod buffer;
mod bridge;
mod builtins;
mod command;
mod dispatcher;
mod events;
mod registry;
mod service;
mod state;

pub use buffer::{LogBuffer, LogEntry, Severity, DEFAULT_LIMIT};
pub use bridge::{
    LogEvent, LogLevel, LogSource, LogSourceBridge, FormatError, MAX_PENDING_EVENTS,
    format_log_event, convert_log_event,
};
pub use builtins::{
    builtin_commands, help_command, clear_command, console_limit_command, example_command,
    TAG_HINT,
};
pub use command::{ConsoleCommand, CommandHandler, CommandArgs, CommandContext};
pub use dispatcher::{resolve_severity, parse_command, ParsedCommand};
pub use events::{
    ConsoleInputEvent, ConsoleToggleEvent, ConsoleViewChangedEvent, ConsoleEventsPlugin,
};
pub use registry::{CommandRegistry, DispatchOutcome};
pub use service::{ConsoleService, ConsoleError, INVALID_COMMAND, MINI_VIEW_LINES};
pub use state::{ConsoleView, ConsoleStatus};

pub(crate) use state::ConsoleState;

#[cfg(test)]
pub(crate) use service::serial;
