//! Encoding detection for input files.
//!
//! Fast and robust without loading the whole file: BOM signature first,
//! then a null-byte heuristic for BOM-less UTF-16, then a strict UTF-8
//! probe over a bounded sample, with windows-1252 as the safe fallback.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, UTF_16LE, WINDOWS_1252};

use crate::error::{IngestError, Result};

const SAMPLE_BYTES: u64 = 512 * 1024;

/// Detect the text encoding of a file from a bounded prefix sample.
pub fn detect_encoding(path: &Path) -> Result<&'static Encoding> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileOpen {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut sample = Vec::new();
    file.take(SAMPLE_BYTES)
        .read_to_end(&mut sample)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let encoding = sniff(&sample);
    tracing::debug!(path = %path.display(), encoding = encoding.name(), "detected encoding");
    Ok(encoding)
}

fn sniff(sample: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(sample) {
        return encoding;
    }
    // Early null bytes suggest BOM-less UTF-16.
    if sample.iter().take(4).any(|b| *b == 0) {
        return UTF_16LE;
    }
    if is_utf8_prefix(sample) {
        return UTF_8;
    }
    WINDOWS_1252
}

/// Valid UTF-8, allowing a multi-byte sequence cut off at the sample edge.
fn is_utf8_prefix(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(_) => true,
        Err(err) => err.error_len().is_none() && bytes.len() - err.valid_up_to() < 4,
    }
}
