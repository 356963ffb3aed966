//! Per-sink row counters shared across all files of a run.

use serde::Serialize;

use scanrep_model::SinkKey;

#[derive(Debug, Clone, Copy, Default, Serialize)]
struct Counter {
    rows: u64,
    header_written: bool,
}

/// Row counts per output stream, shared across every file of a run.
///
/// The counters also record whether a stream's header line has been
/// emitted, so it is written exactly once even when the first table of a
/// kind happens to contain no rows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunCounters {
    t1_normal: Counter,
    t1_ajustada: Counter,
    t2_normal: Counter,
    t2_ajustada: Counter,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, key: SinkKey) -> &Counter {
        match key {
            SinkKey::T1Normal => &self.t1_normal,
            SinkKey::T1Ajustada => &self.t1_ajustada,
            SinkKey::T2Normal => &self.t2_normal,
            SinkKey::T2Ajustada => &self.t2_ajustada,
        }
    }

    fn counter_mut(&mut self, key: SinkKey) -> &mut Counter {
        match key {
            SinkKey::T1Normal => &mut self.t1_normal,
            SinkKey::T1Ajustada => &mut self.t1_ajustada,
            SinkKey::T2Normal => &mut self.t2_normal,
            SinkKey::T2Ajustada => &mut self.t2_ajustada,
        }
    }

    /// Rows written to a stream so far.
    pub fn rows(&self, key: SinkKey) -> u64 {
        self.counter(key).rows
    }

    pub fn increment(&mut self, key: SinkKey) {
        self.counter_mut(key).rows += 1;
    }

    /// True exactly once per stream: the first call marks the header as
    /// written and later calls return false.
    pub fn claim_header(&mut self, key: SinkKey) -> bool {
        let counter = self.counter_mut(key);
        if counter.header_written {
            false
        } else {
            counter.header_written = true;
            true
        }
    }

    pub fn total_rows(&self) -> u64 {
        SinkKey::ALL.iter().map(|key| self.rows(*key)).sum()
    }
}
