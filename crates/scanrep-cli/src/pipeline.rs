//! Two-pass run orchestration.
//!
//! Pass 1 (header discovery) must complete over *all* files before pass 2
//! starts: the finalized schemas depend on the union across the whole
//! run, not just the current file. Files are processed sequentially in
//! the caller-supplied order; a file that fails is reported and skipped
//! while the run continues.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use tracing::{info, info_span, warn};

use scanrep_ingest::{detect_encoding, scan_headers};
use scanrep_model::{HeaderUnion, ProgressSink, RunDate, SinkKey};
use scanrep_output::{FinalizedSchemas, OutputSinks, RunCounters, SinkPaths};
use scanrep_transform::process_file;

use crate::types::{FileFailure, RunReport, SinkReport};

/// Everything a run needs, owned by the caller.
#[derive(Debug)]
pub struct RunRequest {
    pub files: Vec<PathBuf>,
    pub client: String,
    pub date: RunDate,
    pub output_dir: PathBuf,
    /// Skip detection and decode every file with this codec.
    pub forced_encoding: Option<&'static Encoding>,
}

struct PlannedFile {
    path: PathBuf,
    encoding: &'static Encoding,
}

/// Execute a full run: detect codecs, discover headers, finalize schemas,
/// open the four sinks, and materialize every file.
pub fn run(request: &RunRequest, progress: &mut dyn ProgressSink) -> Result<RunReport> {
    let run_span = info_span!("run", client = %request.client, date = %request.date);
    let _guard = run_span.enter();
    let started = Instant::now();
    let mut failures: Vec<FileFailure> = Vec::new();

    // Codec per file, up front, so both passes decode identically.
    let mut planned: Vec<PlannedFile> = Vec::new();
    for path in &request.files {
        let encoding = match request.forced_encoding {
            Some(encoding) => encoding,
            None => match detect_encoding(path) {
                Ok(encoding) => encoding,
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping file");
                    failures.push(failure(path, &error));
                    continue;
                }
            },
        };
        info!(path = %path.display(), encoding = encoding.name(), "planned input");
        planned.push(PlannedFile {
            path: path.clone(),
            encoding,
        });
    }

    // Pass 1: union headers across every file of the run.
    let discovery_start = Instant::now();
    let mut union = HeaderUnion::new();
    planned.retain(|file| {
        match scan_headers(&file.path, file.encoding, progress) {
            Ok(file_union) => {
                union.merge(&file_union);
                true
            }
            Err(error) => {
                warn!(path = %file.path.display(), %error, "header scan failed; skipping file");
                failures.push(failure(&file.path, &error));
                false
            }
        }
    });
    info!(
        files = planned.len(),
        duration_ms = discovery_start.elapsed().as_millis(),
        "header discovery complete"
    );

    // Schemas are frozen for the run before any row is written.
    let schemas = FinalizedSchemas::from_union(&union);

    let paths = SinkPaths::for_run(&request.output_dir, &request.client, request.date);
    let mut sinks = OutputSinks::create(&paths).context("create output sinks")?;
    let mut counters = RunCounters::new();

    // Pass 2: materialize rows against the finalized schemas.
    let materialize_start = Instant::now();
    for file in &planned {
        if let Err(error) = process_file(
            &file.path,
            file.encoding,
            &schemas,
            &request.client,
            request.date,
            &mut sinks,
            &mut counters,
            progress,
        ) {
            warn!(path = %file.path.display(), %error, "processing failed");
            failures.push(failure(&file.path, &error));
        }
    }
    sinks.flush().context("flush output sinks")?;
    info!(
        rows = counters.total_rows(),
        duration_ms = materialize_start.elapsed().as_millis(),
        "materialization complete"
    );

    let sinks_report = SinkKey::ALL
        .iter()
        .map(|key| SinkReport {
            key: *key,
            path: paths.path(*key).to_path_buf(),
            rows: counters.rows(*key),
            columns: schemas.columns(*key).len(),
        })
        .collect();
    info!(
        total_rows = counters.total_rows(),
        failures = failures.len(),
        duration_ms = started.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunReport {
        client: request.client.clone(),
        date: request.date,
        output_dir: request.output_dir.clone(),
        sinks: sinks_report,
        failures,
    })
}

fn failure(path: &Path, error: &dyn std::fmt::Display) -> FileFailure {
    FileFailure {
        path: path.to_path_buf(),
        error: error.to_string(),
    }
}
