//! Minimal headless console example.
//!
//! Drives the console programmatically without any UI and prints the buffer
//! after each frame. Useful for testing or custom UI implementations.
//!
//! Run with: `cargo run --example minimal --no-default-features`

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_runtime_console::prelude::*;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(
            ConsolePlugin::default().with_command(
                ConsoleCommand::new("greet", |args, ctx| {
                    let name = args.get(0).unwrap_or("World");
                    ctx.respond(format!("Hello, {}!", name), Severity::Normal);
                    true
                })
                .description("Greet someone"),
            ),
        )
        .add_systems(Update, send_test_commands.run_if(run_once))
        .add_systems(Update, print_buffer.after(ConsoleSystems))
        .run();
}

/// Send some test lines programmatically.
fn send_test_commands(
    mut inputs: MessageWriter<ConsoleInputEvent>,
    mut toggles: MessageWriter<ConsoleToggleEvent>,
) {
    println!("--- Sending test lines ---");

    inputs.write(ConsoleInputEvent::new("plain text"));
    inputs.write(ConsoleInputEvent::new("#2 a warning"));
    inputs.write(ConsoleInputEvent::new("/GREET Developer"));
    inputs.write(ConsoleInputEvent::new("/help"));
    inputs.write(ConsoleInputEvent::new("/nope"));

    toggles.write(ConsoleToggleEvent);
}

/// Print the buffer once, then exit.
fn print_buffer(console: Res<ConsoleService>, mut exit: MessageWriter<AppExit>) {
    if console.is_empty() {
        return;
    }

    println!("view: {:?}", console.view());
    for entry in console.entries() {
        let tag = match entry.severity() {
            Severity::Normal => "   ",
            Severity::Warning => "[W]",
            Severity::Error => "[E]",
        };
        println!("{} {}", tag, entry.text());
    }
    exit.write(AppExit::Success);
}
