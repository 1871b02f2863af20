//! Error types for the anonymisation pass.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for csv-anon operations.
///
/// Every variant is terminal for the pass that produced it.
#[derive(Debug, Error)]
pub enum AnonymiseError {
    /// The header row could not be read.
    #[error("Failed to read header row: {0}")]
    Read(#[source] csv::Error),

    /// The input produced no rows at all, so there is no header.
    #[error("Input is empty: no header row found")]
    EmptyInput,

    /// No header cell matches the requested field.
    #[error("No matching field found: '{field}'")]
    FieldNotFound { field: String },

    /// The output artifact is already on disk.
    #[error("File {} already exists. Aborting.", .path.display())]
    OutputAlreadyExists { path: PathBuf },

    /// Error opening or creating a file.
    #[error("IO error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a row to an output stream failed.
    #[error("Write error: {0}")]
    Write(#[source] csv::Error),

    /// A data row could not be read.
    #[error("Failed to read row {row}: {source}")]
    RowRead {
        row: u64,
        #[source]
        source: csv::Error,
    },

    /// A data row has a different number of cells than the header.
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowLength {
        row: u64,
        expected: usize,
        found: usize,
    },

    /// A mapping file is malformed.
    #[error("Invalid mapping from {origin}: {message}")]
    Mapping { origin: String, message: String },

    /// A token in an anonymised file has no entry in the mapping.
    #[error("Row {row}: token '{token}' not found in mapping")]
    UnknownToken { row: u64, token: String },
}

/// Result type alias for csv-anon operations.
pub type Result<T> = std::result::Result<T, AnonymiseError>;
