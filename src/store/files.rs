use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use super::location::ensure_dir;
use crate::codec::{read_library, write_library};
use crate::error::LibraryError;
use crate::models::{Detail, Library};

/// Extension given to every saved library.
pub const FILE_EXTENSION: &str = "csv";

/// List the saved libraries in `dir`, sorted by file name. A directory that
/// does not exist yet simply holds no libraries.
pub fn list_library_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "library directory does not exist yet");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Turn a file name typed by the user into a path inside `dir`, appending the
/// `.csv` extension when it is missing.
pub fn library_path(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::Validation { field: "File name" }.into());
    }
    if trimmed.contains(['/', '\\']) {
        return Err(anyhow!("File name cannot contain path separators."));
    }

    let suffix = format!(".{FILE_EXTENSION}");
    let name = if trimmed.ends_with(&suffix) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{suffix}")
    };
    Ok(dir.join(name))
}

/// Read and parse a saved library. Nothing is returned unless the whole file
/// parses.
pub fn load_library<D: Detail>(path: &Path) -> Result<Library<D>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let library: Library<D> = read_library(BufReader::new(file))
        .with_context(|| format!("failed to load {}", path.display()))?;

    info!(
        path = %path.display(),
        name = library.name(),
        books = library.len(),
        "library loaded"
    );
    Ok(library)
}

/// Write `library` to `file_name` inside `dir`, creating the directory when
/// needed. Returns the path that was written.
pub fn save_library<D: Detail>(dir: &Path, file_name: &str, library: &Library<D>) -> Result<PathBuf> {
    let path = library_path(dir, file_name)?;
    ensure_dir(dir)?;

    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    write_library(file, library).with_context(|| format!("failed to write {}", path.display()))?;

    info!(
        path = %path.display(),
        name = library.name(),
        books = library.len(),
        "library saved"
    );
    Ok(path)
}
