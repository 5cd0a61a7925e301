//! Binary entry point: parse flags, open the log file, and hand the terminal
//! to the UI with the book variant chosen on the command line.
use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use library_manager::store::ensure_dir;
use library_manager::{run_app, App, Cli, Config, Isbn, PhotoPath, Variant};

/// Route tracing output to the log file. The terminal belongs to the UI, so
/// nothing may be written to stdout or stderr while it runs. `RUST_LOG`, when
/// set, takes precedence over `--log-level`.
fn initialize_tracing(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        ensure_dir(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    initialize_tracing(&config)?;

    tracing::info!(
        library_dir = %config.library_dir.display(),
        variant = ?config.variant,
        "starting library manager"
    );

    match config.variant {
        Variant::Isbn => run_app(&mut App::<Isbn>::new(config.library_dir)),
        Variant::Photo => run_app(&mut App::<PhotoPath>::new(config.library_dir)),
    }
}
