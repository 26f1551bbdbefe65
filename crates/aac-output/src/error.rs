//! Error types for export writing and re-reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or re-reading an export.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output file or its directory.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or decode CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An exported file lacks a column the table expects.
    #[error("column '{column}' not found in export")]
    MissingColumn { column: String },

    /// A numeric column holds text that is not a number.
    #[error("invalid number '{value}' in column '{column}'")]
    InvalidNumber { column: String, value: String },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
