//! Sentinel marker recognition and embedded table delimitation.

use std::io::Read;

use scanrep_model::TableKind;

use crate::decode::PushbackLines;
use crate::error::Result;

/// Sentinel announcing a control-statistics table.
pub const CONTROL_STATISTICS_MARKER: &str = "Control Statistics";
/// Sentinel announcing a results table.
pub const RESULTS_MARKER: &str = "RESULTS";

/// Classify a raw line as a table sentinel.
///
/// Strips surrounding whitespace and one layer of quote characters, then
/// compares case-insensitively. Pure function.
pub fn classify_marker(line: &str) -> Option<TableKind> {
    let cleaned = line.trim().trim_matches('"').trim_matches('\'');
    if cleaned.eq_ignore_ascii_case(CONTROL_STATISTICS_MARKER) {
        Some(TableKind::ControlStatistics)
    } else if cleaned.eq_ignore_ascii_case(RESULTS_MARKER) {
        Some(TableKind::Results)
    } else {
        None
    }
}

/// Read the next line belonging to the table at the current position.
///
/// Termination is dual: a line classifying as a marker is pushed back (the
/// next caller must see it) and ends the table; an empty or
/// whitespace-only separator line is consumed and ends the table.
fn next_table_line<R: Read>(src: &mut PushbackLines<R>) -> Result<Option<String>> {
    let Some(line) = src.next_line()? else {
        return Ok(None);
    };
    if classify_marker(&line).is_some() {
        src.push_back(line);
        return Ok(None);
    }
    if line.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Lazy, finite, non-restartable sequence of the raw lines of one embedded
/// table.
pub struct TableLines<'a, R: Read> {
    src: &'a mut PushbackLines<R>,
    done: bool,
}

impl<'a, R: Read> TableLines<'a, R> {
    pub fn new(src: &'a mut PushbackLines<R>) -> Self {
        Self { src, done: false }
    }
}

impl<R: Read> Iterator for TableLines<'_, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match next_table_line(self.src) {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// The same table section exposed as `std::io::Read`, lines re-joined with
/// `\n`, so the csv reader can parse quoted fields that span physical
/// lines.
pub struct TableSectionReader<'a, R: Read> {
    src: &'a mut PushbackLines<R>,
    buf: Vec<u8>,
    pos: usize,
    done: bool,
}

impl<'a, R: Read> TableSectionReader<'a, R> {
    pub fn new(src: &'a mut PushbackLines<R>) -> Self {
        Self {
            src,
            buf: Vec::new(),
            pos: 0,
            done: false,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.src.bytes_read()
    }
}

impl<R: Read> Read for TableSectionReader<'_, R> {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if self.pos >= self.buf.len() {
            if self.done {
                return Ok(0);
            }
            match next_table_line(self.src) {
                Ok(Some(line)) => {
                    self.buf.clear();
                    self.buf.extend_from_slice(line.as_bytes());
                    self.buf.push(b'\n');
                    self.pos = 0;
                }
                Ok(None) => {
                    self.done = true;
                    return Ok(0);
                }
                Err(err) => {
                    self.done = true;
                    return Err(std::io::Error::other(err));
                }
            }
        }
        let n = (self.buf.len() - self.pos).min(out.len());
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
