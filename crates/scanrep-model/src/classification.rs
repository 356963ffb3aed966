//! Per-file classification derived from the first metadata line.

use serde::Serialize;

/// What the first line of an input file says about the whole file.
///
/// Computed once at the start of pass 2 and held for the duration of that
/// file. `operating_system` already carries the " Domain Controller"
/// suffix when both heuristics matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileClassification {
    /// File contains the AJUSTADA / AJU adjustment token.
    pub adjusted: bool,
    /// Operating system extracted from the CIS benchmark title, if any.
    pub operating_system: Option<String>,
    /// File metadata mentions DOMAIN CONTROLLER.
    pub domain_controller: bool,
}

impl FileClassification {
    /// The value written into the `operating system` derived column.
    pub fn operating_system_value(&self) -> &str {
        self.operating_system.as_deref().unwrap_or("")
    }
}
