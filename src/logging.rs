//! Custom [LogPlugin](bevy::log::LogPlugin) functionality.
//!
//! Installs a [`tracing_subscriber::Layer`] that forwards every `tracing`
//! event to the shared [`LogSource`], so application logs show up in the
//! console.

use bevy::log::BoxedLayer;
use bevy::prelude::*;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::field::Visit;

use crate::core::{LogEvent, LogLevel, LogSource};

/// A function that implements the log capture functionality for the
/// console via [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
///
/// ```ignore
/// App::new()
///     .add_plugins(DefaultPlugins.set(LogPlugin {
///         custom_layer: bevy_runtime_console::logging::custom_log_layer,
///         ..default()
///     }))
///     .add_plugins(ConsolePlugin::default());
/// ```
pub fn custom_log_layer(app: &mut App) -> Option<BoxedLayer> {
    Some(Box::new(create_custom_log_layer(app)))
}

fn create_custom_log_layer(app: &mut App) -> LogCaptureLayer {
    let source = app
        .world_mut()
        .get_resource_or_insert_with(LogSource::default)
        .clone();

    LogCaptureLayer { source }
}

/// Map a `tracing` level onto the console's log levels.
pub fn log_level(level: Level) -> LogLevel {
    match level {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warning,
        _ => LogLevel::Log,
    }
}

/// Stack text for an event: its target, then an `(at ...)` location line.
pub fn stack_info(metadata: &Metadata<'_>) -> String {
    let location = match (metadata.file(), metadata.line()) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.to_string(),
        _ => metadata.module_path().unwrap_or("unknown").to_string(),
    };
    format!("{}\n(at {})\n", metadata.target(), location)
}

/// A [`Layer`] that publishes log events to a [`LogSource`].
struct LogCaptureLayer {
    source: LogSource,
}

impl<S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>> Layer<S>
    for LogCaptureLayer
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut message = None;
        event.record(&mut LogEventVisitor(&mut message));
        if let Some(message) = message {
            let metadata = event.metadata();
            self.source.publish(LogEvent::new(
                message,
                stack_info(metadata),
                log_level(*metadata.level()),
            ));
        }
    }
}

/// A [`Visit`]or that extracts the `message` field of an event.
struct LogEventVisitor<'a>(&'a mut Option<String>);

impl Visit for LogEventVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // Only log out messages
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::core::{LogSourceBridge, Severity};

    #[test]
    fn test_level_mapping() {
        assert_eq!(log_level(Level::ERROR), LogLevel::Error);
        assert_eq!(log_level(Level::WARN), LogLevel::Warning);
        assert_eq!(log_level(Level::INFO), LogLevel::Log);
        assert_eq!(log_level(Level::TRACE), LogLevel::Log);
    }

    #[test]
    fn test_layer_publishes_tracing_events() {
        let source = LogSource::new();
        let mut bridge = LogSourceBridge::new(source.clone());
        bridge.subscribe();

        let subscriber =
            tracing_subscriber::registry().with(LogCaptureLayer { source: source.clone() });
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("low on fuel");
            tracing::error!(code = 7, "engine failure");
        });

        let lines = bridge.drain();
        assert_eq!(lines.len(), 2);

        assert!(lines[0].0.starts_with("[Warning] low on fuel (at "));
        assert!(lines[0].0.contains("logging.rs"));
        assert_eq!(lines[0].1, Severity::Warning);

        assert!(lines[1].0.starts_with("[Error] engine failure (at "));
        assert_eq!(lines[1].1, Severity::Error);
    }

    #[test]
    fn test_custom_layer_shares_source_resource() {
        let mut app = App::new();
        let layer = create_custom_log_layer(&mut app);

        let shared = app.world().resource::<LogSource>();
        let mut bridge = LogSourceBridge::new(shared.clone());
        bridge.subscribe();

        layer.source.publish(LogEvent::new("hi", "(at here)", LogLevel::Log));
        assert_eq!(bridge.drain().len(), 1);
    }
}
