//! Scan report ingestion.
//!
//! This crate owns everything that reads input files: the decoded,
//! pushback-capable line source, encoding detection, sentinel marker
//! scanning, first-line classification, and the pass-1 header discovery
//! that accumulates the per-kind column unions.
//!
//! Input files are security-scan exports with repeating embedded tables
//! demarcated by sentinel lines rather than a fixed grammar. Files may be
//! far larger than memory; everything here streams line by line.

mod classify;
mod csv_line;
mod decode;
mod detect;
mod error;
mod headers;
mod marker;

pub use classify::classify_first_line;
pub use csv_line::parse_csv_line;
pub use decode::{DecodedLineReader, PushbackLines, resolve_codec};
pub use detect::detect_encoding;
pub use error::{IngestError, Result};
pub use headers::{HEADER_PROGRESS_INTERVAL_BYTES, file_size, scan_headers};
pub use marker::{
    CONTROL_STATISTICS_MARKER, RESULTS_MARKER, TableLines, TableSectionReader, classify_marker,
};
