//! Shared data model for scan report normalization.
//!
//! This crate defines the vocabulary types used across the pipeline:
//! table kinds and sink keys, the accumulated header union, per-file
//! classification, run parameters, and progress events. It carries no
//! parsing or I/O logic of its own.

mod classification;
mod error;
mod progress;
mod run;
mod table;
mod union;

pub use classification::FileClassification;
pub use error::ModelError;
pub use progress::{NullProgress, Phase, ProgressEvent, ProgressSink};
pub use run::RunDate;
pub use table::{SinkKey, TableKind};
pub use union::HeaderUnion;
