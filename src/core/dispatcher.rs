//! Input line parsing.
//!
//! Two independent steps run on every submitted line:
//! - an optional inline severity tag (`#1 text`) is resolved and stripped,
//! - a line starting with the command prefix is split into a keyword and
//!   arguments.

use super::Severity;

/// Resolve an inline severity tag.
///
/// A line is tagged when it is longer than three characters, starts with `#`
/// and has a space as its third character. The tag is stripped whether or not
/// the digit is known; unknown digits fall back to `default`.
///
/// # Examples
///
/// ```
/// use bevy_runtime_console::core::{resolve_severity, Severity};
///
/// assert_eq!(resolve_severity("#1 boom", Severity::Normal), ("boom", Severity::Error));
/// assert_eq!(resolve_severity("#9 boom", Severity::Warning), ("boom", Severity::Warning));
/// assert_eq!(resolve_severity("#1boom", Severity::Normal), ("#1boom", Severity::Normal));
/// ```
pub fn resolve_severity(line: &str, default: Severity) -> (&str, Severity) {
    let mut chars = line.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('#'), Some(tag), Some(' ')) if !chars.as_str().is_empty() => {
            let severity = Severity::from_tag(tag).unwrap_or(default);
            (chars.as_str(), severity)
        }
        _ => (line, default),
    }
}

/// A prefixed line split into keyword and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command keyword (first token after the prefix).
    pub keyword: &'a str,
    /// The remaining tokens.
    pub args: Vec<&'a str>,
    /// The line the command was parsed from.
    pub raw: &'a str,
}

/// Split a prefixed line into a command invocation.
///
/// Returns `None` when `line` does not start with `prefix`. Tokens are split
/// on single spaces, so consecutive spaces produce empty arguments.
///
/// # Examples
///
/// ```
/// use bevy_runtime_console::core::parse_command;
///
/// let cmd = parse_command("/consolelimit 5", "/").unwrap();
/// assert_eq!(cmd.keyword, "consolelimit");
/// assert_eq!(cmd.args, vec!["5"]);
///
/// assert!(parse_command("hello there", "/").is_none());
/// ```
pub fn parse_command<'a>(line: &'a str, prefix: &str) -> Option<ParsedCommand<'a>> {
    let body = line.strip_prefix(prefix)?;
    let mut tokens = body.split(' ');
    let keyword = tokens.next().unwrap_or_default();

    Some(ParsedCommand {
        keyword,
        args: tokens.collect(),
        raw: line,
    })
}
