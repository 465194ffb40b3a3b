//! Terminal console example.
//!
//! Demonstrates the stdin/stdout backend for headless applications like
//! dedicated servers.
//!
//! Run with: `cargo run --example terminal --no-default-features --features terminal`
//!
//! Lines:
//! - `/help` - List available commands
//! - `/status` - Show server status
//! - `/say <message>` - Broadcast a message
//! - `/quit` - Exit the application
//! - `#1 text` - Echo text as an error line

use std::sync::atomic::{AtomicBool, Ordering};

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_runtime_console::TerminalConfig;
use bevy_runtime_console::prelude::*;

static QUIT: AtomicBool = AtomicBool::new(false);

fn main() {
    println!("=== Terminal Console Example ===");
    println!("Type lines and press Enter. Type '/quit' to exit.");
    println!();

    // Ensure output is flushed before starting the app
    use std::io::Write;
    let _ = std::io::stdout().flush();

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(
            ConsolePlugin::default()
                .with_config(ConsoleConfig::default().capacity(200))
                .with_command(
                    ConsoleCommand::new("status", |_args, ctx| {
                        ctx.respond(
                            format!(
                                "=== Status ===\nLine limit: {}\nCommands: {}",
                                ctx.limit(),
                                ctx.commands().count()
                            ),
                            Severity::Normal,
                        );
                        true
                    })
                    .description("Show server status"),
                )
                .with_command(
                    ConsoleCommand::new("say", |args, ctx| {
                        if args.is_empty() {
                            ctx.respond("Usage: say <message>", Severity::Warning);
                        } else {
                            ctx.respond(format!("[SERVER] {}", args.join(" ")), Severity::Normal);
                        }
                        true
                    })
                    .description("Broadcast a message"),
                )
                .with_command(
                    ConsoleCommand::new("quit", |_args, _ctx| {
                        QUIT.store(true, Ordering::Relaxed);
                        true
                    })
                    .description("Exit the application"),
                ),
        )
        .insert_resource(TerminalConfig { colored: true })
        .add_systems(Update, exit_on_quit.after(ConsoleSystems))
        .run();
}

fn exit_on_quit(mut exit: MessageWriter<AppExit>) {
    if QUIT.load(Ordering::Relaxed) {
        exit.write(AppExit::Success);
    }
}
