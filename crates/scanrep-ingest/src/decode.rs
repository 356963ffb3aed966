//! Decoded line streaming with one-line pushback.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use encoding_rs::{CoderResult, Decoder, Encoding};

use crate::error::{IngestError, Result};

const READ_CHUNK_BYTES: usize = 64 * 1024;

/// Resolve a codec label from the fixed encoding catalog.
pub fn resolve_codec(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| IngestError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Streams lines from a byte source decoded with a caller-supplied codec.
///
/// Malformed byte sequences become U+FFFD replacement characters and never
/// abort the stream. A leading BOM that identifies a different encoding
/// overrides the supplied codec. Line terminators (`\n`, `\r\n`) are
/// stripped from returned lines.
pub struct DecodedLineReader<R: Read> {
    inner: R,
    decoder: Decoder,
    path: PathBuf,
    pending: String,
    bytes_read: u64,
    input_done: bool,
    decode_done: bool,
}

impl DecodedLineReader<File> {
    /// Open a file for decoded line streaming.
    pub fn open(path: &Path, encoding: &'static Encoding) -> Result<Self> {
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
        let mut reader = Self::from_reader(file, encoding);
        reader.path = path.to_path_buf();
        Ok(reader)
    }
}

impl<R: Read> DecodedLineReader<R> {
    /// Wrap an arbitrary byte source (used by tests and in-memory callers).
    pub fn from_reader(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: encoding.new_decoder(),
            path: PathBuf::new(),
            pending: String::new(),
            bytes_read: 0,
            input_done: false,
            decode_done: false,
        }
    }

    /// Raw bytes consumed from the underlying source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Yield the next line, or `None` once the stream is exhausted.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(idx) = self.pending.find('\n') {
                let rest = self.pending.split_off(idx + 1);
                let mut line = std::mem::replace(&mut self.pending, rest);
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }
            if self.decode_done {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                let mut line = std::mem::take(&mut self.pending);
                if line.ends_with('\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }
            if self.input_done {
                self.decode_chunk(&[], true);
                self.decode_done = true;
                continue;
            }
            let mut buf = [0u8; READ_CHUNK_BYTES];
            let n = self
                .inner
                .read(&mut buf)
                .map_err(|source| IngestError::FileRead {
                    path: self.path.clone(),
                    source,
                })?;
            if n == 0 {
                self.input_done = true;
                continue;
            }
            self.bytes_read += n as u64;
            self.decode_chunk(&buf[..n], false);
        }
    }

    fn decode_chunk(&mut self, bytes: &[u8], last: bool) {
        let mut consumed = 0;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(bytes.len() - consumed)
                .unwrap_or(READ_CHUNK_BYTES);
            self.pending.reserve(needed);
            let (result, read, _replaced) =
                self.decoder
                    .decode_to_string(&bytes[consumed..], &mut self.pending, last);
            consumed += read;
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => {}
            }
        }
    }
}

/// A line cursor supporting one-line lookahead/putback.
///
/// Used to delimit embedded tables without a fixed grammar: a lookahead
/// that turns out not to apply (e.g. the next table's sentinel) is pushed
/// back and returned again on the next read.
pub struct PushbackLines<R: Read> {
    lines: DecodedLineReader<R>,
    pushed: Option<String>,
}

impl<R: Read> PushbackLines<R> {
    pub fn new(lines: DecodedLineReader<R>) -> Self {
        Self {
            lines,
            pushed: None,
        }
    }

    pub fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pushed.take() {
            return Ok(Some(line));
        }
        self.lines.next_line()
    }

    /// Push one previously-read line back; it is returned on the next read.
    pub fn push_back(&mut self, line: String) {
        debug_assert!(self.pushed.is_none(), "single-slot pushback overwritten");
        self.pushed = Some(line);
    }

    pub fn bytes_read(&self) -> u64 {
        self.lines.bytes_read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    fn reader<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> DecodedLineReader<&'a [u8]> {
        DecodedLineReader::from_reader(bytes, encoding)
    }

    #[test]
    fn yields_lines_without_terminators() {
        let mut lines = reader(b"one\r\ntwo\nthree", UTF_8);
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("one"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("two"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("three"));
        assert_eq!(lines.next_line().unwrap(), None);
        assert_eq!(lines.next_line().unwrap(), None);
    }

    #[test]
    fn malformed_bytes_become_replacement_characters() {
        let mut lines = reader(b"ok\n\xff\xfe broken\n", UTF_8);
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("ok"));
        let line = lines.next_line().unwrap().unwrap();
        assert!(line.contains('\u{FFFD}'));
        assert!(line.ends_with(" broken"));
    }

    #[test]
    fn decodes_windows_1252() {
        let mut lines = reader(b"configuraci\xf3n\n", WINDOWS_1252);
        assert_eq!(
            lines.next_line().unwrap().as_deref(),
            Some("configuraci\u{f3}n")
        );
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut lines = reader(b"\xef\xbb\xbfhead\nnext\n", UTF_8);
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("head"));
    }

    #[test]
    fn tracks_bytes_read() {
        let mut lines = reader(b"abc\ndef\n", UTF_8);
        while lines.next_line().unwrap().is_some() {}
        assert_eq!(lines.bytes_read(), 8);
    }

    #[test]
    fn pushback_returns_line_again() {
        let mut src = PushbackLines::new(reader(b"first\nsecond\n", UTF_8));
        let line = src.next_line().unwrap().unwrap();
        src.push_back(line);
        assert_eq!(src.next_line().unwrap().as_deref(), Some("first"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("second"));
        assert_eq!(src.next_line().unwrap(), None);
    }

    #[test]
    fn resolve_codec_accepts_catalog_labels() {
        assert_eq!(resolve_codec("utf-8").unwrap().name(), "UTF-8");
        assert_eq!(resolve_codec("latin1").unwrap().name(), "windows-1252");
        assert!(resolve_codec("klingon").is_err());
    }
}
