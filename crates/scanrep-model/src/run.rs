//! Run parameters.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::ModelError;

/// Calendar date a run is keyed on, used for derived columns and output
/// file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl RunDate {
    /// Build a run date, rejecting impossible calendar dates.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ModelError> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(ModelError::InvalidDate {
                value: format!("{year:04}-{month:02}-{day:02}"),
            });
        }
        Ok(Self { year, month, day })
    }

    /// Parse a `YYYY-MM-DD` date string.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let date =
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ModelError::InvalidDate {
                value: value.to_string(),
            })?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }
}

impl std::fmt::Display for RunDate {
    /// ISO form, as used in output file names.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let date = RunDate::parse("2024-03-07").unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 3, 7));
        assert_eq!(date.to_string(), "2024-03-07");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(RunDate::parse("2024-13-01").is_err());
        assert!(RunDate::parse("07/03/2024").is_err());
        assert!(RunDate::parse("").is_err());
        assert!(RunDate::new(2024, 2, 30).is_err());
    }
}
