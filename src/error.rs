//! Error kinds surfaced by the catalog model and the file codec. The UI turns
//! each variant into a footer message, so the `Display` text is written for a
//! person rather than a log parser.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// A required value was empty: the library name or one of the book fields.
    #[error("{field} cannot be empty.")]
    Validation { field: &'static str },

    /// The persisted file could not be parsed. `line` is 1-based and points at
    /// the physical line where the offending record starts.
    #[error("Malformed library file (line {line}): {reason}")]
    Format { line: usize, reason: String },

    /// Positional access outside `0..len`.
    #[error("No book at position {index} (library holds {len}).")]
    NotFound { index: usize, len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LibraryError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        LibraryError::Format {
            line,
            reason: reason.into(),
        }
    }
}
