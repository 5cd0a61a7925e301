use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-manager";
/// Sub-folder of the data directory that holds saved libraries.
const LIBRARIES_DIR_NAME: &str = "libraries";

/// Resolve the absolute path of the application data directory inside the
/// user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Where libraries are saved when no directory is given on the command line.
pub fn default_library_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join(LIBRARIES_DIR_NAME))
}

/// Create `dir` and its parents if they do not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))
}
