//! Built-in console commands: `help`, `clear`, `consolelimit` and `example`.

use super::{ConsoleCommand, Severity};

/// Hint appended to the `help` listing.
pub const TAG_HINT: &str = "You can also add '#1 ' or '#2 ' at the start to make the line colored as an error or a warning, respectively.";

/// All built-in commands, in the order `help` lists them.
pub fn builtin_commands() -> Vec<ConsoleCommand> {
    vec![help_command(), clear_command(), console_limit_command(), example_command()]
}

/// `help` - list every registered command and the tag syntax.
pub fn help_command() -> ConsoleCommand {
    ConsoleCommand::new("help", |_args, ctx| {
        let mut response = String::from("List of all Commands :\n");
        for cmd in ctx.commands() {
            response.push_str(ctx.prefix());
            response.push_str(cmd.keyword());
            if !cmd.get_description().is_empty() {
                response.push_str(" - ");
                response.push_str(cmd.get_description());
            }
            response.push('\n');
        }
        response.push_str(TAG_HINT);

        ctx.respond(response, Severity::Normal);
        true
    })
    .description("List all commands")
}

/// `clear` - empty the console.
pub fn clear_command() -> ConsoleCommand {
    ConsoleCommand::new("clear", |_args, ctx| {
        ctx.clear();
        true
    })
    .description("Clear console output")
}

/// `consolelimit <n>` - set how many lines the console keeps.
///
/// Declines unless given exactly one integer argument.
pub fn console_limit_command() -> ConsoleCommand {
    ConsoleCommand::new("consolelimit", |args, ctx| {
        if args.len() != 1 {
            return false;
        }
        let Some(limit) = args.parse::<i32>(0) else {
            return false;
        };

        let applied = ctx.set_limit(i64::from(limit));
        ctx.respond(format!("Set Console line limit to {}", applied), Severity::Normal);
        true
    })
    .description("Set the number of lines kept")
}

/// `example <args...>` - report how many arguments were given.
pub fn example_command() -> ConsoleCommand {
    ConsoleCommand::new("example", |args, ctx| {
        ctx.respond(
            format!("This is an example command.\n{} argument(s) were given.", args.len()),
            Severity::Normal,
        );
        true
    })
    .description("Echo the argument count")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommandArgs, CommandRegistry, ConsoleState};

    fn run(line: &str, state: &mut ConsoleState) -> bool {
        let registry = CommandRegistry::new(builtin_commands());
        let cmd = crate::core::parse_command(line, "/").unwrap();
        let args = CommandArgs::new(cmd.raw, cmd.args);
        registry.dispatch(cmd.keyword, &args, state).is_handled()
    }

    fn enabled_state() -> ConsoleState {
        let mut state = ConsoleState::new("/", 50);
        state.enable();
        state
    }

    #[test]
    fn test_help_lists_every_keyword() {
        let mut state = enabled_state();
        assert!(run("/help", &mut state));

        let text = state.get(0).unwrap().text();
        assert!(text.starts_with("List of all Commands :\n"));
        for keyword in ["/help", "/clear", "/consolelimit", "/example"] {
            assert!(text.contains(keyword), "missing {keyword}");
        }
        assert!(text.ends_with(TAG_HINT));
    }

    #[test]
    fn test_clear() {
        let mut state = enabled_state();
        state.respond("a", Severity::Normal);
        state.respond("b", Severity::Error);

        assert!(run("/clear", &mut state));
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn test_consolelimit_declines_bad_arguments() {
        let mut state = enabled_state();

        assert!(!run("/consolelimit", &mut state));
        assert!(!run("/consolelimit 1 2", &mut state));
        assert!(!run("/consolelimit abc", &mut state));
        assert!(!run("/consolelimit 99999999999", &mut state));
        assert_eq!(state.limit(), 50);
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn test_consolelimit_clamps_and_confirms() {
        let mut state = enabled_state();

        assert!(run("/consolelimit -2", &mut state));
        assert_eq!(state.limit(), 1);
        assert_eq!(state.get(0).unwrap().text(), "Set Console line limit to 1");
    }

    #[test]
    fn test_example_counts_arguments() {
        let mut state = enabled_state();

        assert!(run("/example a  b", &mut state));
        assert_eq!(
            state.get(0).unwrap().text(),
            "This is an example command.\n3 argument(s) were given."
        );
    }
}
