//! Pass 2: stream one file against the finalized schemas.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use encoding_rs::Encoding;

use scanrep_ingest::{
    DecodedLineReader, PushbackLines, TableSectionReader, classify_first_line, classify_marker,
    file_size, parse_csv_line,
};
use scanrep_model::{
    FileClassification, Phase, ProgressEvent, ProgressSink, RunDate, SinkKey, TableKind,
};
use scanrep_output::{FinalizedSchemas, OutputSinks, RunCounters};

use crate::error::{Result, TransformError};
use crate::naming;

/// A progress event is emitted every this many rows written per file.
pub const ROW_PROGRESS_INTERVAL: u64 = 2000;

/// Materialize one input file into the run's output sinks.
///
/// The file is classified from its first line, then every embedded table
/// is mapped onto the finalized schema of its (kind, variant) stream with
/// the derived columns injected. Row counters are shared across all files
/// of the run and drive the header-once rule per sink.
#[allow(clippy::too_many_arguments)]
pub fn process_file<W: Write>(
    path: &Path,
    encoding: &'static Encoding,
    schemas: &FinalizedSchemas,
    client: &str,
    date: RunDate,
    sinks: &mut OutputSinks<W>,
    counters: &mut RunCounters,
    progress: &mut dyn ProgressSink,
) -> Result<()> {
    let total_bytes = file_size(path)?;
    let file_name = display_name(path);
    let started = Instant::now();
    let mut src = PushbackLines::new(DecodedLineReader::open(path, encoding)?);
    let mut rows_total = 0u64;

    let Some(first_line) = src.next_line()? else {
        progress.emit(ProgressEvent::snapshot(
            &file_name,
            Phase::Data,
            0,
            src.bytes_read(),
            total_bytes,
            started.elapsed(),
        ));
        return Ok(());
    };
    let classification = classify_first_line(&first_line);
    tracing::debug!(
        file = %file_name,
        adjusted = classification.adjusted,
        operating_system = classification.operating_system_value(),
        domain_controller = classification.domain_controller,
        "classified input file"
    );

    while let Some(line) = src.next_line()? {
        let Some(kind) = classify_marker(&line) else {
            continue;
        };
        // Truncated input: a marker with no header line after it ends the
        // file's scan, not the run.
        let Some(header_line) = src.next_line()? else {
            break;
        };
        let header = parse_csv_line(&header_line);
        let key = SinkKey::for_table(kind, classification.adjusted);
        let schema = schemas.columns(key);
        let scan_name = naming::scan_name(client, date, kind, classification.adjusted);
        let periodo = naming::periodo(date);

        if counters.claim_header(key) {
            sinks.get_mut(key).write_header(schema)?;
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(TableSectionReader::new(&mut src));
        let mut record = csv::StringRecord::new();
        loop {
            let more = reader
                .read_record(&mut record)
                .map_err(|source| TransformError::TableRead {
                    path: path.to_path_buf(),
                    source,
                })?;
            if !more {
                break;
            }
            let fields: Vec<&str> = record.iter().collect();
            let row = build_row(
                kind,
                schema,
                &header,
                &fields,
                &classification,
                &scan_name,
                &periodo,
            );
            sinks.get_mut(key).write_row(schema, &row)?;
            counters.increment(key);
            rows_total += 1;
            if rows_total % ROW_PROGRESS_INTERVAL == 0 {
                progress.emit(ProgressEvent::snapshot(
                    &file_name,
                    Phase::Data,
                    rows_total,
                    reader.get_ref().bytes_read(),
                    total_bytes,
                    started.elapsed(),
                ));
            }
        }
    }

    progress.emit(ProgressEvent::snapshot(
        &file_name,
        Phase::Data,
        rows_total,
        src.bytes_read(),
        total_bytes,
        started.elapsed(),
    ));
    Ok(())
}

/// Build one output record: default every schema column to empty, overlay
/// source values positionally by header name, then inject the derived
/// columns for the table kind.
fn build_row(
    kind: TableKind,
    schema: &[String],
    header: &[String],
    fields: &[&str],
    classification: &FileClassification,
    scan_name: &str,
    periodo: &str,
) -> BTreeMap<String, String> {
    let mut row: BTreeMap<String, String> = schema
        .iter()
        .map(|column| (column.clone(), String::new()))
        .collect();
    // Short rows leave trailing columns empty; extra fields beyond the
    // header are dropped by the zip.
    for (column, value) in header.iter().zip(fields.iter()) {
        row.insert(column.clone(), (*value).to_string());
    }
    match kind {
        TableKind::ControlStatistics => {
            row.insert(
                "operating system".to_string(),
                classification.operating_system_value().to_string(),
            );
        }
        TableKind::Results => {
            if classification.domain_controller {
                let current = row
                    .get("Operating System")
                    .map(|value| value.trim_end().to_string())
                    .unwrap_or_default();
                let suffixed = if current.is_empty() {
                    "Domain Controller".to_string()
                } else {
                    format!("{current} Domain Controller")
                };
                row.insert("Operating System".to_string(), suffixed);
            }
        }
    }
    row.insert("scan_name".to_string(), scan_name.to_string());
    row.insert("periodo".to_string(), periodo.to_string());
    row
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
