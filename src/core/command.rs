//! Console command implementation.
//!
//! A command is a keyword bound to a handler. Handlers report whether they
//! handled the invocation; returning `false` declines it so the next command
//! registered under the same keyword gets a chance.

use std::sync::Arc;

use super::{CommandRegistry, ConsoleState, Severity};

/// Arguments passed to a command handler.
#[derive(Debug, Clone)]
pub struct CommandArgs<'a> {
    /// The raw input line.
    raw: &'a str,
    /// Parsed arguments (excluding the keyword).
    args: Vec<&'a str>,
}

impl<'a> CommandArgs<'a> {
    /// Create new command args from a raw string and parsed arguments.
    pub fn new(raw: &'a str, args: Vec<&'a str>) -> Self {
        Self { raw, args }
    }

    /// Get the raw input line.
    #[inline]
    pub fn raw(&self) -> &str {
        self.raw
    }

    /// Get the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if there are no arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Get an argument by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).copied()
    }

    /// Try to parse an argument as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> Option<T> {
        self.get(index).and_then(|s| s.parse().ok())
    }

    /// Get all arguments as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[&str] {
        &self.args
    }

    /// Iterate over arguments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().copied()
    }

    /// Join all arguments with a separator.
    pub fn join(&self, separator: &str) -> String {
        self.args.join(separator)
    }
}

impl std::ops::Index<usize> for CommandArgs<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.args[index]
    }
}

/// Type alias for command handler functions.
///
/// Handlers receive the parsed arguments and a [`CommandContext`] onto the
/// console, and return `true` when the invocation was handled.
pub type CommandHandler = Arc<dyn Fn(&CommandArgs, &mut CommandContext) -> bool + Send + Sync>;

/// What a handler can reach while it runs.
///
/// The context borrows the console's buffer and the registry that is
/// dispatching the command, so handlers can respond, clear, resize the buffer
/// or list the other commands.
pub struct CommandContext<'a> {
    console: &'a mut ConsoleState,
    registry: &'a CommandRegistry,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(console: &'a mut ConsoleState, registry: &'a CommandRegistry) -> Self {
        Self { console, registry }
    }

    /// Buffer a response line. Dropped while the console is disabled.
    pub fn respond(&mut self, text: impl Into<String>, severity: Severity) {
        self.console.respond(text, severity);
    }

    /// Remove every buffered line.
    pub fn clear(&mut self) {
        self.console.clear();
    }

    /// Current buffer capacity.
    pub fn limit(&self) -> usize {
        self.console.limit()
    }

    /// Change the buffer capacity. Values below 1 are raised to 1.
    ///
    /// Returns the capacity actually applied.
    pub fn set_limit(&mut self, limit: i64) -> usize {
        self.console.set_limit(limit)
    }

    /// Whether lines are currently being buffered.
    pub fn is_enabled(&self) -> bool {
        self.console.is_enabled()
    }

    /// The command prefix.
    pub fn prefix(&self) -> &str {
        self.console.prefix()
    }

    /// Every registered command, in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &ConsoleCommand> {
        self.registry.iter()
    }
}

/// A console command with a handler function.
///
/// # Examples
///
/// ```
/// use bevy_runtime_console::core::{ConsoleCommand, Severity};
///
/// let echo = ConsoleCommand::new("echo", |args, ctx| {
///     ctx.respond(args.join(" "), Severity::Normal);
///     true
/// })
/// .description("Print text to console");
///
/// assert_eq!(echo.keyword(), "echo");
/// ```
#[derive(Clone)]
pub struct ConsoleCommand {
    keyword: Box<str>,
    description: &'static str,
    handler: CommandHandler,
}

impl ConsoleCommand {
    /// Create a new command with the given keyword and handler.
    pub fn new<F>(keyword: impl Into<Box<str>>, handler: F) -> Self
    where
        F: Fn(&CommandArgs, &mut CommandContext) -> bool + Send + Sync + 'static,
    {
        Self {
            keyword: keyword.into(),
            description: "",
            handler: Arc::new(handler),
        }
    }

    /// Set the description.
    pub fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    /// Get the command keyword.
    #[inline]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Get the description.
    #[inline]
    pub fn get_description(&self) -> &'static str {
        self.description
    }

    /// Check whether `keyword` names this command, ignoring case.
    pub fn matches(&self, keyword: &str) -> bool {
        self.keyword
            .chars()
            .flat_map(char::to_lowercase)
            .eq(keyword.chars().flat_map(char::to_lowercase))
    }

    /// Run the handler. Returns `false` when the handler declined.
    pub fn process(&self, args: &CommandArgs, ctx: &mut CommandContext) -> bool {
        (self.handler)(args, ctx)
    }
}

impl std::fmt::Debug for ConsoleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleCommand")
            .field("keyword", &self.keyword)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_basic() {
        let args = CommandArgs::new("/echo hello world", vec!["hello", "world"]);
        assert_eq!(args.len(), 2);
        assert_eq!(args.get(0), Some("hello"));
        assert_eq!(args.get(1), Some("world"));
        assert_eq!(args.get(2), None);
        assert_eq!(&args[1], "world");
        assert_eq!(args.raw(), "/echo hello world");
    }

    #[test]
    fn test_command_args_parse() {
        let args = CommandArgs::new("/consolelimit 42", vec!["42"]);
        assert_eq!(args.parse::<i32>(0), Some(42));
        assert_eq!(args.parse::<i32>(1), None);

        let args = CommandArgs::new("/consolelimit abc", vec!["abc"]);
        assert_eq!(args.parse::<i32>(0), None);
    }

    #[test]
    fn test_command_matches_ignoring_case() {
        let cmd = ConsoleCommand::new("ConsoleLimit", |_, _| true);
        assert!(cmd.matches("consolelimit"));
        assert!(cmd.matches("CONSOLELIMIT"));
        assert!(!cmd.matches("consolelimits"));
        assert!(!cmd.matches(""));
    }

    #[test]
    fn test_command_creation() {
        let cmd = ConsoleCommand::new("test", |_, _| false).description("A test command");

        assert_eq!(cmd.keyword(), "test");
        assert_eq!(cmd.get_description(), "A test command");
        assert!(format!("{cmd:?}").contains("test"));
    }
}
