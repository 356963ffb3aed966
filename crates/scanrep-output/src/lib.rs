//! Normalized CSV output.
//!
//! Turns accumulated header unions into finalized write schemas and owns
//! the four output sinks of a run, including the header-written-once
//! discipline tracked by the run counters.

mod counters;
mod error;
mod schema;
mod sink;

pub use counters::RunCounters;
pub use error::{OutputError, Result};
pub use schema::{
    FinalizedSchemas, T1_DERIVED_COLUMNS, T2_DERIVED_COLUMNS, finalize_columns,
};
pub use sink::{CsvSink, OutputSinks, SinkPaths};
