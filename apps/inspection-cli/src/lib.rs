//! Bridge inspection command-line front end
//!
//! The binary parses [`Cli`], loads [`Config`] and opens a file-backed store;
//! [`execute`] then runs one command against any `KeyValueStore`, which keeps
//! the commands testable with an in-memory store.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command, SettingsAction, SettingsUpdate};
pub use config::Config;

use chrono::Local;
use inspection_store::KeyValueStore;
use std::io::Write;

/// Run one command, writing user-facing output to `out`
pub fn execute<S: KeyValueStore>(
    command: Command,
    config: &Config,
    store: &mut S,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let now = Local::now();
    match command {
        Command::Home => commands::home::run(store, out),
        Command::New { draft } => commands::new::run(store, config, &draft, now, out),
        Command::Reports { query } => {
            commands::reports::run(store, query.as_deref().unwrap_or(""), out)
        }
        Command::Report { id, out: dir } => {
            let dir = dir.unwrap_or_else(|| config.report.output_dir.clone());
            commands::report::run(store, config, &id, &dir, now, out)
        }
        Command::History => commands::history::run(store, out),
        Command::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(store, out),
            SettingsAction::Set(update) => commands::settings::set(store, update, out),
        },
        Command::Clear { yes } => commands::clear::run(store, yes, out),
    }
}
