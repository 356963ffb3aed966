//! Schema finalization: union columns plus derived columns.

use scanrep_model::{HeaderUnion, SinkKey, TableKind};

/// Derived columns appended to control-statistics schemas.
pub const T1_DERIVED_COLUMNS: [&str; 3] = ["operating system", "scan_name", "periodo"];
/// Derived columns appended to results schemas. The capitalized
/// `Operating System` matches the source exports, which already carry the
/// column in some files.
pub const T2_DERIVED_COLUMNS: [&str; 3] = ["Operating System", "scan_name", "periodo"];

/// Copy a union's column list and append the kind-specific derived columns
/// that are not already present, in fixed order. Idempotent.
pub fn finalize_columns(columns: &[String], kind: TableKind) -> Vec<String> {
    let derived = match kind {
        TableKind::ControlStatistics => &T1_DERIVED_COLUMNS,
        TableKind::Results => &T2_DERIVED_COLUMNS,
    };
    let mut schema: Vec<String> = columns.to_vec();
    for name in derived {
        if !schema.iter().any(|existing| existing == name) {
            schema.push((*name).to_string());
        }
    }
    schema
}

/// The definitive write schema of each output stream.
///
/// Frozen once per run, before any row is written; every row of the run is
/// written against these column lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedSchemas {
    t1_normal: Vec<String>,
    t1_ajustada: Vec<String>,
    t2_normal: Vec<String>,
    t2_ajustada: Vec<String>,
}

impl FinalizedSchemas {
    /// Finalize every stream of a run from the accumulated union.
    pub fn from_union(union: &HeaderUnion) -> Self {
        Self {
            t1_normal: finalize_columns(&union.t1_normal, TableKind::ControlStatistics),
            t1_ajustada: finalize_columns(&union.t1_ajustada, TableKind::ControlStatistics),
            t2_normal: finalize_columns(&union.t2_normal, TableKind::Results),
            t2_ajustada: finalize_columns(&union.t2_ajustada, TableKind::Results),
        }
    }

    pub fn columns(&self, key: SinkKey) -> &[String] {
        match key {
            SinkKey::T1Normal => &self.t1_normal,
            SinkKey::T1Ajustada => &self.t1_ajustada,
            SinkKey::T2Normal => &self.t2_normal,
            SinkKey::T2Ajustada => &self.t2_ajustada,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn appends_derived_columns_in_fixed_order() {
        let schema = finalize_columns(&cols(&["host", "ip"]), TableKind::ControlStatistics);
        assert_eq!(
            schema,
            cols(&["host", "ip", "operating system", "scan_name", "periodo"])
        );
    }

    #[test]
    fn results_kind_uses_capitalized_os_column() {
        let schema = finalize_columns(&cols(&["host"]), TableKind::Results);
        assert_eq!(
            schema,
            cols(&["host", "Operating System", "scan_name", "periodo"])
        );
    }

    #[test]
    fn existing_derived_columns_are_not_duplicated() {
        let schema = finalize_columns(
            &cols(&["Operating System", "host"]),
            TableKind::Results,
        );
        assert_eq!(
            schema,
            cols(&["Operating System", "host", "scan_name", "periodo"])
        );
    }

    #[test]
    fn finalize_is_idempotent() {
        let base = cols(&["a", "b"]);
        let once = finalize_columns(&base, TableKind::ControlStatistics);
        let twice = finalize_columns(&once, TableKind::ControlStatistics);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_union_still_gets_derived_columns() {
        let schemas = FinalizedSchemas::from_union(&HeaderUnion::new());
        assert_eq!(
            schemas.columns(SinkKey::T2Ajustada),
            cols(&["Operating System", "scan_name", "periodo"])
        );
        assert_eq!(
            schemas.columns(SinkKey::T1Normal),
            cols(&["operating system", "scan_name", "periodo"])
        );
    }
}
