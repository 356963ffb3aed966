//! Error types for scan report ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input files.
///
/// Decode failures are never represented here: malformed bytes are
/// degraded to replacement characters by the line source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open input file.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read from input file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Codec label not recognized by the encoding catalog.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
