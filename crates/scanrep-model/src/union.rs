//! Accumulated header unions per table kind and adjustment variant.

use std::collections::HashSet;

use crate::table::{SinkKey, TableKind};

/// The ordered union of column names seen across all embedded tables of a
/// run, kept separately per (table kind x adjustment variant).
///
/// Insertion order is preserved, membership is deduplicated by exact string
/// match, and a name is never removed once added. Both variants of a kind
/// are updated from every discovered header; variant-specific filtering
/// happens only at write time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderUnion {
    pub t1_normal: Vec<String>,
    pub t1_ajustada: Vec<String>,
    pub t2_normal: Vec<String>,
    pub t2_ajustada: Vec<String>,
}

impl HeaderUnion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union the column names of one embedded table header into both
    /// variant accumulators of its kind.
    pub fn record_header(&mut self, kind: TableKind, columns: &[String]) {
        match kind {
            TableKind::ControlStatistics => {
                merge_columns(&mut self.t1_normal, columns);
                merge_columns(&mut self.t1_ajustada, columns);
            }
            TableKind::Results => {
                merge_columns(&mut self.t2_normal, columns);
                merge_columns(&mut self.t2_ajustada, columns);
            }
        }
    }

    /// Fold another union into this one, preserving this union's ordering
    /// for names already present.
    pub fn merge(&mut self, other: &HeaderUnion) {
        merge_columns(&mut self.t1_normal, &other.t1_normal);
        merge_columns(&mut self.t1_ajustada, &other.t1_ajustada);
        merge_columns(&mut self.t2_normal, &other.t2_normal);
        merge_columns(&mut self.t2_ajustada, &other.t2_ajustada);
    }

    pub fn columns(&self, key: SinkKey) -> &[String] {
        match key {
            SinkKey::T1Normal => &self.t1_normal,
            SinkKey::T1Ajustada => &self.t1_ajustada,
            SinkKey::T2Normal => &self.t2_normal,
            SinkKey::T2Ajustada => &self.t2_ajustada,
        }
    }

    pub fn is_empty(&self) -> bool {
        SinkKey::ALL.iter().all(|key| self.columns(*key).is_empty())
    }
}

/// Append names from `incoming` that `current` does not already contain.
fn merge_columns(current: &mut Vec<String>, incoming: &[String]) {
    let mut seen: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut added: Vec<String> = Vec::new();
    for name in incoming {
        if !seen.contains(name.as_str()) {
            added.push(name.clone());
            seen.insert(name.as_str());
        }
    }
    current.extend(added);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn union_preserves_order_and_deduplicates() {
        let mut union = HeaderUnion::new();
        union.record_header(TableKind::ControlStatistics, &cols(&["a", "b"]));
        union.record_header(TableKind::ControlStatistics, &cols(&["b", "c"]));
        assert_eq!(union.t1_normal, cols(&["a", "b", "c"]));
        assert_eq!(union.t1_ajustada, cols(&["a", "b", "c"]));
        assert!(union.t2_normal.is_empty());
    }

    #[test]
    fn record_header_updates_both_variants_of_a_kind() {
        let mut union = HeaderUnion::new();
        union.record_header(TableKind::Results, &cols(&["host", "ip"]));
        assert_eq!(union.t2_normal, cols(&["host", "ip"]));
        assert_eq!(union.t2_ajustada, cols(&["host", "ip"]));
        assert!(union.t1_normal.is_empty());
        assert!(union.t1_ajustada.is_empty());
    }

    #[test]
    fn merge_keeps_left_ordering() {
        let mut left = HeaderUnion::new();
        left.record_header(TableKind::ControlStatistics, &cols(&["a", "b"]));
        let mut right = HeaderUnion::new();
        right.record_header(TableKind::ControlStatistics, &cols(&["b", "c", "a"]));
        left.merge(&right);
        assert_eq!(left.t1_normal, cols(&["a", "b", "c"]));
    }

    #[test]
    fn empty_union_reports_empty() {
        assert!(HeaderUnion::new().is_empty());
        let mut union = HeaderUnion::new();
        union.record_header(TableKind::Results, &cols(&["x"]));
        assert!(!union.is_empty());
    }
}
