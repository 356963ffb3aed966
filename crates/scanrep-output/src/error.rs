//! Error types for output writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating or writing output sinks.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create an output file or its parent directory.
    #[error("failed to create output {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a CSV row or header.
    #[error("failed to write output row: {source}")]
    Write {
        #[source]
        source: csv::Error,
    },

    /// Failed to flush buffered output.
    #[error("failed to flush output: {source}")]
    Flush {
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for OutputError {
    fn from(source: csv::Error) -> Self {
        Self::Write { source }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
