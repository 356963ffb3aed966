//! Error types for the shared data model.

use thiserror::Error;

/// Errors produced when constructing model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Run date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid run date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },
}
