//! Pass 1: header discovery.

use std::path::Path;
use std::time::Instant;

use encoding_rs::Encoding;

use scanrep_model::{HeaderUnion, Phase, ProgressEvent, ProgressSink};

use crate::csv_line::parse_csv_line;
use crate::decode::{DecodedLineReader, PushbackLines};
use crate::error::{IngestError, Result};
use crate::marker::{TableLines, classify_marker};

/// Discovery emits a progress event roughly this often, by bytes consumed.
pub const HEADER_PROGRESS_INTERVAL_BYTES: u64 = 16 * 1024 * 1024;

/// Size of a file in bytes, with ingestion error mapping.
pub fn file_size(path: &Path) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(metadata.len())
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Scan one file and accumulate the union of embedded table headers.
///
/// The first line is file-level metadata and is discarded. Every sentinel
/// marker is followed by a CSV header row whose column names are unioned
/// into both variant accumulators of the marker's kind; the table rows
/// after it are drained without being retained. A marker as the very last
/// line of the stream ends the scan without error.
pub fn scan_headers(
    path: &Path,
    encoding: &'static Encoding,
    progress: &mut dyn ProgressSink,
) -> Result<HeaderUnion> {
    let total_bytes = file_size(path)?;
    let file_name = display_name(path);
    let started = Instant::now();
    let mut src = PushbackLines::new(DecodedLineReader::open(path, encoding)?);
    let mut union = HeaderUnion::new();

    // File-level metadata line, not a column header.
    if src.next_line()?.is_none() {
        progress.emit(ProgressEvent::snapshot(
            &file_name,
            Phase::Headers,
            0,
            src.bytes_read(),
            total_bytes,
            started.elapsed(),
        ));
        return Ok(union);
    }

    let mut last_reported = 0u64;
    while let Some(line) = src.next_line()? {
        let Some(kind) = classify_marker(&line) else {
            continue;
        };
        let Some(header_line) = src.next_line()? else {
            break;
        };
        let columns = parse_csv_line(&header_line);
        tracing::trace!(
            file = %file_name,
            kind = kind.describe(),
            columns = columns.len(),
            "discovered embedded table header"
        );
        union.record_header(kind, &columns);
        for row in TableLines::new(&mut src) {
            row?;
        }
        if src.bytes_read() - last_reported >= HEADER_PROGRESS_INTERVAL_BYTES {
            last_reported = src.bytes_read();
            progress.emit(ProgressEvent::snapshot(
                &file_name,
                Phase::Headers,
                0,
                src.bytes_read(),
                total_bytes,
                started.elapsed(),
            ));
        }
    }

    progress.emit(ProgressEvent::snapshot(
        &file_name,
        Phase::Headers,
        0,
        total_bytes,
        total_bytes,
        started.elapsed(),
    ));
    Ok(union)
}
