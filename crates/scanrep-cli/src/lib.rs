//! Library surface of the scanrep CLI.
//!
//! The binary lives in `main.rs`; the pieces integration tests need
//! (pipeline orchestration, logging, progress rendering, summaries) are
//! exposed here.

pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod summary;
pub mod types;
