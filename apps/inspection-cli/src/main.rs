//! Bridge inspection CLI binary

use anyhow::Context;
use clap::Parser;
use inspection_cli::{execute, Cli, Config};
use inspection_store::FileStore;
use inspection_types::ValidationError;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(invalid) = err.downcast_ref::<ValidationError>() {
                eprintln!("Cannot save inspection: {}", invalid);
                return ExitCode::from(2);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.storage.data_dir.clone());
    tracing::debug!(data_dir = %data_dir.display(), "Opening inspection store");

    let mut store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &config, &mut store, &mut out)
}
