//! Terminal backend for headless/dedicated server console.
//!
//! This module provides stdin/stdout integration for running the console
//! without a graphical UI, useful for dedicated servers.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::ConsoleSystems;
use crate::core::{ConsoleInputEvent, ConsoleService, LogEntry, Severity};

/// Plugin that adds terminal (stdin/stdout) console support.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(
                Update,
                (
                    read_stdin.before(ConsoleSystems),
                    write_stdout.after(ConsoleSystems),
                ),
            );
    }
}

/// Configuration for terminal behavior.
#[derive(Resource)]
pub struct TerminalConfig {
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { colored: false } // Disabled by default - causes issues on some terminals
    }
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        let handle = stdin.lock();

        for line in handle.lines().map_while(Result::ok) {
            let text = line.trim().to_string();
            if !text.is_empty() && sender.send(text).is_err() {
                break;
            }
        }
    })
}

fn read_stdin(receiver: Res<StdinReceiver>, mut events: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = receiver.0.lock() else { return };
    while let Ok(line) = rx.try_recv() {
        events.write(ConsoleInputEvent::new(line));
    }
}

/// Print every line buffered since the previous frame.
fn write_stdout(
    console: Res<ConsoleService>,
    config: Res<TerminalConfig>,
    mut printed: Local<u64>,
) {
    let sequence = console.sequence();
    if sequence == *printed {
        return;
    }

    for entry in fresh_entries(&console, *printed) {
        if config.colored {
            print_colored(entry);
        } else {
            println!("{}", entry.text());
        }
    }
    let _ = io::stdout().flush();
    *printed = sequence;
}

/// Lines appended after `seen` that are still buffered, oldest first.
fn fresh_entries(console: &ConsoleService, seen: u64) -> impl Iterator<Item = &LogEntry> {
    let fresh = usize::try_from(console.sequence().saturating_sub(seen)).unwrap_or(usize::MAX);
    console.entries().skip(console.len().saturating_sub(fresh))
}

fn print_colored(entry: &LogEntry) {
    let color = match entry.severity() {
        Severity::Normal => "\x1b[0m",
        Severity::Warning => "\x1b[33m",
        Severity::Error => "\x1b[31m",
    };
    println!("{}{}\x1b[0m", color, entry.text());
}
