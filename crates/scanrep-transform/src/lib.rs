//! Pass 2: row materialization.
//!
//! Re-streams each input file against the finalized schemas: classifies
//! the file from its first line, maps every embedded table's rows onto
//! the target schema, injects the derived columns, and hands rows to the
//! output sinks.

mod error;
mod naming;
mod process;

pub use error::{Result, TransformError};
pub use naming::{SPANISH_MONTHS, periodo, scan_name, spanish_month};
pub use process::{ROW_PROGRESS_INTERVAL, process_file};
