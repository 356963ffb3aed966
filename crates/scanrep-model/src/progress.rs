//! Progress events pushed by the two pipeline passes.

use serde::Serialize;

/// Which pass of the pipeline an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Pass 1: header discovery.
    Headers,
    /// Pass 2: row materialization.
    Data,
}

/// A snapshot of throughput for one file.
///
/// Rates are derived by the consumer from `elapsed_secs`; the producers
/// only record raw counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEvent {
    /// File name the event refers to.
    pub file: String,
    pub phase: Phase,
    /// Rows written so far in this file (always 0 during discovery).
    pub rows: u64,
    /// Bytes consumed from the underlying file so far.
    pub bytes: u64,
    /// Total size of the file in bytes.
    pub total_bytes: u64,
    /// Seconds since processing of this file started.
    pub elapsed_secs: f64,
}

impl ProgressEvent {
    /// Snapshot the current counters of a file in flight.
    pub fn snapshot(
        file: &str,
        phase: Phase,
        rows: u64,
        bytes: u64,
        total_bytes: u64,
        elapsed: std::time::Duration,
    ) -> Self {
        Self {
            file: file.to_string(),
            phase,
            rows,
            bytes,
            total_bytes,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    pub fn rows_per_sec(&self) -> f64 {
        self.rows as f64 / self.elapsed_secs.max(1e-6)
    }

    pub fn mb_per_sec(&self) -> f64 {
        (self.bytes as f64 / 1_000_000.0) / self.elapsed_secs.max(1e-6)
    }
}

/// One-way consumer of progress events.
///
/// Implementations must not block: the pipeline pushes events inline and
/// expects the call to return promptly.
pub trait ProgressSink {
    fn emit(&mut self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(ProgressEvent),
{
    fn emit(&mut self, event: ProgressEvent) {
        self(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn emit(&mut self, _event: ProgressEvent) {}
}
