//! Error types for row materialization.

use std::path::PathBuf;
use thiserror::Error;

use scanrep_ingest::IngestError;
use scanrep_output::OutputError;

/// Errors that can occur while materializing one input file.
///
/// These are per-file failures: the caller may report them and continue
/// the run with the remaining files. Malformed rows and truncated tables
/// are tolerated and never surface here.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Reading the input file failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Writing to an output sink failed.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The csv reader failed on a table section (I/O, not row shape).
    #[error("failed to read table rows from {path}: {source}")]
    TableRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
