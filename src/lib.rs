//! An in-game runtime console for Bevy.
//!
//! bevy_runtime_console provides:
//!
//! - **LogBuffer**: A bounded, ordered scrollback with FIFO eviction
//! - **ConsoleCommand**: Slash commands with case-insensitive keywords
//! - **Log capture**: Application `tracing` events mirrored into the console
//! - **ConsoleService**: The process-wide console renderers read from
//!
//! # Features
//!
//! - `capture` (default): `tracing` layer feeding application logs into the console
//! - `terminal`: stdin/stdout backend for dedicated servers
//! - `persist`: RON configuration file
//! - `full`: Enable capture + persist
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::log::LogPlugin;
//! use bevy::prelude::*;
//! use bevy_runtime_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins.set(LogPlugin {
//!             custom_layer: bevy_runtime_console::logging::custom_log_layer,
//!             ..default()
//!         }))
//!         .add_plugins(ConsolePlugin::default().with_command(
//!             ConsoleCommand::new("noclip", |_, ctx| {
//!                 ctx.respond("Noclip toggled!", Severity::Normal);
//!                 true
//!             })
//!             .description("Toggle noclip mode"),
//!         ))
//!         .run();
//! }
//! ```

use bevy::prelude::*;

// Core module (always available, zero optional deps)
pub mod core;

pub mod config;

// Re-export core types at crate root for convenience
pub use core::{
    LogBuffer, LogEntry, Severity,
    ConsoleCommand, CommandHandler, CommandArgs, CommandContext,
    CommandRegistry, DispatchOutcome,
    resolve_severity, parse_command, ParsedCommand,
    LogEvent, LogLevel, LogSource, LogSourceBridge,
    ConsoleService, ConsoleError, ConsoleView, ConsoleStatus,
    ConsoleInputEvent, ConsoleToggleEvent, ConsoleViewChangedEvent, ConsoleEventsPlugin,
    builtin_commands,
};
pub use config::ConsoleConfig;

// Log capture (feature-gated)
#[cfg(feature = "capture")]
pub mod logging;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

#[cfg(feature = "persist")]
pub use persist::{ConsoleConfigFile, ConfigError};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalPlugin, TerminalConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Severity, LogEntry,
        ConsoleCommand, CommandArgs, CommandContext,
        ConsoleService, ConsoleView, ConsoleStatus,
        ConsoleInputEvent, ConsoleToggleEvent, ConsoleViewChangedEvent,
        LogEvent, LogLevel, LogSource,
    };
    pub use crate::{ConsoleConfig, ConsolePlugin, ConsoleSystems};
}

/// System set containing the console's per-frame systems.
///
/// Order input producers `.before(ConsoleSystems)` and renderers
/// `.after(ConsoleSystems)`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConsoleSystems;

/// Main console plugin.
///
/// # Configuration
///
/// ```ignore
/// ConsolePlugin::default()
///     .with_config(ConsoleConfig::default().prefix("!").capacity(200))
///     .with_command(my_command())
/// ```
///
/// # Panics
///
/// Building the plugin panics if a [`ConsoleService`] already exists in the
/// process.
pub struct ConsolePlugin {
    config: ConsoleConfig,
    commands: Vec<ConsoleCommand>,
}

impl Default for ConsolePlugin {
    /// Default configuration with the built-in commands.
    fn default() -> Self {
        Self {
            config: ConsoleConfig::default(),
            commands: builtin_commands(),
        }
    }
}

impl ConsolePlugin {
    /// Default configuration without any command.
    pub fn bare() -> Self {
        Self {
            config: ConsoleConfig::default(),
            commands: Vec::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a command. Commands are tried in the order they were added.
    pub fn with_command(mut self, command: ConsoleCommand) -> Self {
        self.commands.push(command);
        self
    }

    /// Read the configuration from a RON file, keeping defaults for anything
    /// missing.
    #[cfg(feature = "persist")]
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Self {
        Self::default().with_config(persist::load_console_config(path))
    }
}

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        let source = app
            .world_mut()
            .get_resource_or_insert_with(LogSource::default)
            .clone();

        let console = ConsoleService::new(
            self.config.prefix.clone(),
            self.config.capacity,
            self.config.enabled,
            CommandRegistry::new(self.commands.iter().cloned()),
            source,
        )
        .unwrap_or_else(|err| panic!("ConsolePlugin: {err}"));

        app.insert_resource(self.config.clone())
            .insert_resource(console)
            .add_plugins(core::ConsoleEventsPlugin);

        // Per-frame pipeline
        // 1. toggle_on_key: Turn the configured key into toggle events
        // 2. apply_toggle_events: Cycle the view
        // 3. pump_log_events: Move captured log events into the buffer
        // 4. submit_console_input: Parse and dispatch submitted lines
        app.add_systems(
            Update,
            (
                toggle_on_key,
                apply_toggle_events,
                pump_log_events,
                submit_console_input,
            )
                .chain()
                .in_set(ConsoleSystems),
        );

        // Terminal backend (feature-gated)
        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// Send a toggle event when the configured key is pressed.
fn toggle_on_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    config: Res<ConsoleConfig>,
    mut toggles: MessageWriter<ConsoleToggleEvent>,
) {
    let Some(keys) = keys else { return };
    if keys.just_pressed(config.toggle_key) {
        toggles.write(ConsoleToggleEvent);
    }
}

/// Cycle the view once per toggle event.
fn apply_toggle_events(
    mut toggles: MessageReader<ConsoleToggleEvent>,
    mut console: ResMut<ConsoleService>,
    mut changes: MessageWriter<ConsoleViewChangedEvent>,
) {
    for _ in toggles.read() {
        if let Some(view) = console.toggle() {
            changes.write(ConsoleViewChangedEvent::new(view));
        }
    }
}

/// Drain the log bridge into the buffer.
fn pump_log_events(mut console: ResMut<ConsoleService>) {
    console.pump_log_events();
}

/// Feed submitted lines through the console.
fn submit_console_input(
    mut inputs: MessageReader<ConsoleInputEvent>,
    mut console: ResMut<ConsoleService>,
) {
    for input in inputs.read() {
        console.submit(&input.line, input.severity);
    }
}


// Integration tests run without the terminal feature since its stdin thread
// would compete with the test harness.
// Run with: cargo test
#[cfg(all(test, not(feature = "terminal")))]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::{INVALID_COMMAND, LogEvent, LogLevel, serial};

    fn app_with(plugin: ConsolePlugin) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);
        app
    }

    fn texts(app: &App) -> Vec<String> {
        app.world()
            .resource::<ConsoleService>()
            .entries()
            .map(|e| e.text().to_string())
            .collect()
    }

    #[test]
    fn test_input_events_are_submitted() {
        let _serial = serial();
        let mut app = app_with(ConsolePlugin::default());

        app.world_mut().write_message(ConsoleInputEvent::new("hello"));
        app.world_mut().write_message(ConsoleInputEvent::new("/consolelimit 5"));
        app.update();

        let console = app.world().resource::<ConsoleService>();
        assert_eq!(console.limit(), 5);
        assert_eq!(
            texts(&app),
            vec!["hello", "/consolelimit 5", "Set Console line limit to 5"]
        );
    }

    #[test]
    fn test_custom_command_runs() {
        let _serial = serial();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let mut app = app_with(ConsolePlugin::bare().with_command(ConsoleCommand::new(
            "spawn",
            move |args, ctx| {
                counter.fetch_add(args.len(), Ordering::SeqCst);
                ctx.respond("spawned", Severity::Normal);
                true
            },
        )));

        app.world_mut().write_message(ConsoleInputEvent::new("/Spawn a b"));
        app.update();

        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(texts(&app), vec!["/Spawn a b", "spawned"]);
    }

    #[test]
    fn test_unknown_command_through_app() {
        let _serial = serial();
        let mut app = app_with(ConsolePlugin::bare());

        app.world_mut().write_message(ConsoleInputEvent::new("/doesnotexist"));
        app.update();

        assert_eq!(texts(&app), vec!["/doesnotexist", INVALID_COMMAND]);
    }

    #[test]
    fn test_toggle_events_cycle_view() {
        let _serial = serial();
        let mut app = app_with(ConsolePlugin::default());

        let mut seen = Vec::new();
        for _ in 0..3 {
            app.world_mut().write_message(ConsoleToggleEvent);
            app.update();
            seen.push(app.world().resource::<ConsoleService>().view());
        }

        assert_eq!(seen, vec![ConsoleView::Full, ConsoleView::Mini, ConsoleView::Hidden]);
    }

    #[test]
    fn test_toggle_key() {
        let _serial = serial();
        let mut app = app_with(
            ConsolePlugin::default().with_config(ConsoleConfig::default().toggle_key(KeyCode::F1)),
        );

        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::F1);
        app.insert_resource(keys);
        app.update();

        assert_eq!(app.world().resource::<ConsoleService>().view(), ConsoleView::Full);
    }

    #[test]
    fn test_other_keys_do_not_toggle() {
        let _serial = serial();
        let mut app = app_with(ConsolePlugin::default());

        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyA);
        app.insert_resource(keys);
        app.update();

        assert_eq!(app.world().resource::<ConsoleService>().view(), ConsoleView::Hidden);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Backquote);
        app.update();

        assert_eq!(app.world().resource::<ConsoleService>().view(), ConsoleView::Full);
    }

    #[test]
    fn test_log_events_reach_buffer() {
        let _serial = serial();
        let mut app = app_with(ConsolePlugin::default());

        let source = app.world().resource::<LogSource>().clone();
        source.publish(LogEvent::new("asset loaded", "(at assets.rs:10)", LogLevel::Log));
        source.publish(LogEvent::new("shader failed", "(at render.rs:4)", LogLevel::Exception));
        app.update();

        let console = app.world().resource::<ConsoleService>();
        assert_eq!(console.len(), 2);
        assert_eq!(console.get(0).unwrap().text(), "[Log] asset loaded (at assets.rs:10)");
        assert_eq!(console.severity_of(1).unwrap(), Severity::Error);
    }

    #[test]
    fn test_disabled_plugin_still_runs_commands() {
        let _serial = serial();
        let mut app = app_with(
            ConsolePlugin::default().with_config(ConsoleConfig::default().enabled(false)),
        );

        app.world_mut().write_message(ConsoleInputEvent::new("/consolelimit 3"));
        app.world_mut().write_message(ConsoleInputEvent::new("chat line"));
        app.world_mut().write_message(ConsoleToggleEvent);
        app.update();

        let console = app.world().resource::<ConsoleService>();
        assert_eq!(console.status(), ConsoleStatus::Disabled);
        assert!(console.is_empty());
        assert_eq!(console.limit(), 3);
    }

    #[test]
    fn test_plugin_releases_singleton_on_drop() {
        let _serial = serial();
        let app = app_with(ConsolePlugin::default());
        assert!(ConsoleService::exists());

        drop(app);
        assert!(!ConsoleService::exists());
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_second_plugin_panics() {
        let _serial = serial();
        let _first = app_with(ConsolePlugin::default());
        let _second = app_with(ConsolePlugin::default());
    }
}
