//! Log capture example.
//!
//! Routes `tracing` output into the console through the custom log layer and
//! prints the resulting lines.
//!
//! Run with: `cargo run --example capture`

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_runtime_console::prelude::*;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin {
            custom_layer: bevy_runtime_console::logging::custom_log_layer,
            ..default()
        })
        .add_plugins(ConsolePlugin::default())
        .add_systems(Startup, emit_logs)
        .add_systems(Update, print_buffer.after(ConsoleSystems))
        .run();
}

fn emit_logs() {
    info!("Assets loaded");
    warn!("Texture missing, using fallback");
    error!("Shader failed to compile");
}

/// Print captured lines once, then exit.
fn print_buffer(console: Res<ConsoleService>, mut exit: MessageWriter<AppExit>) {
    if console.len() < 3 {
        return;
    }

    println!("--- Console buffer ---");
    for entry in console.entries() {
        println!("{:>7}: {}", entry.severity().to_string(), entry.text());
    }
    exit.write(AppExit::Success);
}
