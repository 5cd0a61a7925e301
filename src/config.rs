//! Command-line configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::store::{data_dir, default_library_dir};

/// File name of the log written inside the data directory.
const LOG_FILE_NAME: &str = "library-manager.log";

#[derive(Parser, Debug)]
#[clap(
    name = "library-manager",
    about = "Create, edit and save book libraries from the terminal",
    version
)]
pub struct Cli {
    /// Directory holding saved libraries (defaults to ~/.library-manager/libraries)
    #[clap(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Which fifth column books carry in this session
    #[clap(long, value_enum, default_value = "isbn")]
    pub variant: Variant,

    /// Log verbosity written to the log file
    #[clap(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Book variant used for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Books carry an ISBN
    Isbn,
    /// Books carry an optional photo path
    Photo,
}

/// Verbosity of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where libraries are listed, loaded and saved. Always absolute.
    pub library_dir: PathBuf,
    /// Tracing output goes here, since the terminal belongs to the UI.
    pub log_file: PathBuf,
    pub variant: Variant,
    /// Used when `RUST_LOG` is unset.
    pub log_level: LogLevel,
}

impl Config {
    /// Fill in defaults for everything the command line left out.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let library_dir = match cli.dir {
            Some(dir) => absolutize(dir)?,
            None => default_library_dir()?,
        };

        Ok(Self {
            library_dir,
            log_file: data_dir()?.join(LOG_FILE_NAME),
            variant: cli.variant,
            log_level: cli.log_level,
        })
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}
