//! Table kinds and output sink identities.

use serde::Serialize;

/// The two embedded table categories found in scan report exports.
///
/// Each kind is announced by its own sentinel line and carries an
/// independent column schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Per-control summary statistics ("Control Statistics" sentinel).
    ControlStatistics,
    /// Per-host scan results ("RESULTS" sentinel).
    Results,
}

impl TableKind {
    /// Human-readable name used in logs and the inspect output.
    pub fn describe(self) -> &'static str {
        match self {
            TableKind::ControlStatistics => "control statistics",
            TableKind::Results => "results",
        }
    }
}

/// Identity of one of the four output streams of a run.
///
/// A closed enumeration: (table kind x adjustment variant). The string
/// forms match the keys the downstream indexer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKey {
    T1Normal,
    T1Ajustada,
    T2Normal,
    T2Ajustada,
}

impl SinkKey {
    /// All sink keys in their canonical order.
    pub const ALL: [SinkKey; 4] = [
        SinkKey::T1Normal,
        SinkKey::T1Ajustada,
        SinkKey::T2Normal,
        SinkKey::T2Ajustada,
    ];

    /// Select the sink for a table of `kind` from a file classified as
    /// adjusted or not.
    pub fn for_table(kind: TableKind, adjusted: bool) -> Self {
        match (kind, adjusted) {
            (TableKind::ControlStatistics, false) => SinkKey::T1Normal,
            (TableKind::ControlStatistics, true) => SinkKey::T1Ajustada,
            (TableKind::Results, false) => SinkKey::T2Normal,
            (TableKind::Results, true) => SinkKey::T2Ajustada,
        }
    }

    pub fn table_kind(self) -> TableKind {
        match self {
            SinkKey::T1Normal | SinkKey::T1Ajustada => TableKind::ControlStatistics,
            SinkKey::T2Normal | SinkKey::T2Ajustada => TableKind::Results,
        }
    }

    pub fn is_adjusted(self) -> bool {
        matches!(self, SinkKey::T1Ajustada | SinkKey::T2Ajustada)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SinkKey::T1Normal => "t1_normal",
            SinkKey::T1Ajustada => "t1_ajustada",
            SinkKey::T2Normal => "t2_normal",
            SinkKey::T2Ajustada => "t2_ajustada",
        }
    }
}

impl std::fmt::Display for SinkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_key_selection_covers_all_variants() {
        assert_eq!(
            SinkKey::for_table(TableKind::ControlStatistics, false),
            SinkKey::T1Normal
        );
        assert_eq!(
            SinkKey::for_table(TableKind::ControlStatistics, true),
            SinkKey::T1Ajustada
        );
        assert_eq!(
            SinkKey::for_table(TableKind::Results, false),
            SinkKey::T2Normal
        );
        assert_eq!(
            SinkKey::for_table(TableKind::Results, true),
            SinkKey::T2Ajustada
        );
    }

    #[test]
    fn sink_key_round_trips_kind_and_variant() {
        for key in SinkKey::ALL {
            assert_eq!(SinkKey::for_table(key.table_kind(), key.is_adjusted()), key);
        }
    }

    #[test]
    fn sink_key_string_forms() {
        let names: Vec<&str> = SinkKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["t1_normal", "t1_ajustada", "t2_normal", "t2_ajustada"]
        );
    }
}
