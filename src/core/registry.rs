//! Ordered command registry.
//!
//! Keywords are not unique: every command registered under a keyword is
//! tried in registration order until one handles the invocation.

use super::{CommandArgs, CommandContext, ConsoleCommand, ConsoleState};

/// Result of dispatching a keyword.
///
/// `Declined` and `NoMatch` produce the same visible response; they are kept
/// apart so callers and tests can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler accepted the invocation.
    Handled,
    /// At least one command matched, and every one of them declined.
    Declined,
    /// No command is registered under the keyword.
    NoMatch,
}

impl DispatchOutcome {
    /// Check if a handler accepted the invocation.
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled)
    }
}

/// Registry of console commands.
///
/// Built once from an ordered list and never mutated afterwards. Empty slots
/// are allowed and skipped, which lets configuration leave holes in the list.
///
/// # Examples
///
/// ```
/// use bevy_runtime_console::core::{CommandRegistry, ConsoleCommand};
///
/// let registry = CommandRegistry::new([
///     ConsoleCommand::new("spawn", |args, _| args.len() == 1),
///     ConsoleCommand::new("SPAWN", |_, _| true),
/// ]);
///
/// assert_eq!(registry.lookup("Spawn").count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    slots: Vec<Option<ConsoleCommand>>,
}

impl CommandRegistry {
    /// Create a registry from an ordered list of commands.
    pub fn new(commands: impl IntoIterator<Item = ConsoleCommand>) -> Self {
        Self::from_slots(commands.into_iter().map(Some))
    }

    /// Create a registry from an ordered list of possibly empty slots.
    pub fn from_slots(slots: impl IntoIterator<Item = Option<ConsoleCommand>>) -> Self {
        let registry = Self {
            slots: slots.into_iter().collect(),
        };

        for (i, cmd) in registry.iter().enumerate() {
            if registry.iter().take(i).any(|earlier| earlier.matches(cmd.keyword())) {
                bevy::log::debug!(
                    "Console: keyword '{}' is shared by several commands, they will be tried in order",
                    cmd.keyword()
                );
            }
        }

        registry
    }

    /// Iterate over registered commands in order, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = &ConsoleCommand> {
        self.slots.iter().flatten()
    }

    /// Number of registered commands (empty slots excluded).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Every command whose keyword matches `keyword` ignoring case, in
    /// registration order.
    pub fn lookup<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a ConsoleCommand> {
        self.iter().filter(move |cmd| cmd.matches(keyword))
    }

    /// Try each matching command in order until one handles the invocation.
    pub(crate) fn dispatch(
        &self,
        keyword: &str,
        args: &CommandArgs,
        console: &mut ConsoleState,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::NoMatch;

        for cmd in self.lookup(keyword) {
            let mut ctx = CommandContext::new(console, self);
            if cmd.process(args, &mut ctx) {
                return DispatchOutcome::Handled;
            }
            outcome = DispatchOutcome::Declined;
        }

        outcome
    }
}
