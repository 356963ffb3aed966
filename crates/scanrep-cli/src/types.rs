//! Result types reported by the processing pipeline.

use std::path::PathBuf;

use serde::Serialize;

use scanrep_model::{RunDate, SinkKey};

/// Outcome of one full two-pass run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub client: String,
    pub date: RunDate,
    pub output_dir: PathBuf,
    pub sinks: Vec<SinkReport>,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn total_rows(&self) -> u64 {
        self.sinks.iter().map(|sink| sink.rows).sum()
    }
}

/// One output stream of a run.
#[derive(Debug, Serialize)]
pub struct SinkReport {
    pub key: SinkKey,
    pub path: PathBuf,
    pub rows: u64,
    pub columns: usize,
}

/// A file that could not be processed; the run continued without it.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}
