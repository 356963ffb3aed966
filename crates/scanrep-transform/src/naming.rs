//! Derived-field naming: scan names and the reporting period.

use scanrep_model::{RunDate, TableKind};

/// Spanish month names used in scan names, indexed by month - 1.
pub const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Spanish name for a 1-based month. Out-of-range months (unreachable for
/// a validated `RunDate`) yield an empty segment rather than panicking.
pub fn spanish_month(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| SPANISH_MONTHS.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// Build the `scan_name` derived value:
/// `{client}-hardening[-control-statics]-{year}-{month_name}-{day:02}[-ajustado]`.
pub fn scan_name(client: &str, date: RunDate, kind: TableKind, adjusted: bool) -> String {
    let mut name = format!("{client}-hardening");
    if kind == TableKind::ControlStatistics {
        name.push_str("-control-statics");
    }
    name.push_str(&format!(
        "-{}-{}-{:02}",
        date.year,
        spanish_month(date.month),
        date.day
    ));
    if adjusted {
        name.push_str("-ajustado");
    }
    name
}

/// Build the `periodo` derived value: `{day}/{month}/{year}`, unpadded.
pub fn periodo(date: RunDate) -> String {
    format!("{}/{}/{}", date.day, date.month, date.year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> RunDate {
        RunDate::parse(value).unwrap()
    }

    #[test]
    fn scan_name_for_adjusted_control_statistics() {
        assert_eq!(
            scan_name(
                "Acme",
                date("2024-03-07"),
                TableKind::ControlStatistics,
                true
            ),
            "Acme-hardening-control-statics-2024-marzo-07-ajustado"
        );
    }

    #[test]
    fn scan_name_for_normal_results() {
        assert_eq!(
            scan_name("Acme", date("2024-12-31"), TableKind::Results, false),
            "Acme-hardening-2024-diciembre-31"
        );
    }

    #[test]
    fn periodo_is_unpadded() {
        assert_eq!(periodo(date("2024-03-07")), "7/3/2024");
        assert_eq!(periodo(date("2024-11-23")), "23/11/2024");
    }

    #[test]
    fn month_names_cover_the_year() {
        assert_eq!(spanish_month(1), "enero");
        assert_eq!(spanish_month(9), "septiembre");
        assert_eq!(spanish_month(12), "diciembre");
        assert_eq!(spanish_month(0), "");
        assert_eq!(spanish_month(13), "");
    }
}
