//! First-line classification heuristics.
//!
//! The first line of every export is free-form metadata. Three heuristics
//! derive per-file facts from it: the adjustment token, the operating
//! system named in the CIS benchmark title, and the domain-controller
//! mention. Downstream column values come straight from these patterns,
//! so their exact semantics (first-match-wins across the two OS patterns,
//! two alternative adjustment tokens) must not be simplified.

use std::sync::LazyLock;

use regex::Regex;

use scanrep_model::FileClassification;

/// "CIS Benchmark for <OS> v..." — tried first.
static OS_BENCHMARK_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CIS\s+Benchmark\s+for\s+(.+?)\s+v").expect("invalid benchmark-for regex")
});

/// "CIS <OS> Benchmark" — fallback pattern.
static OS_BENCHMARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CIS\s+(.+?)\s+Benchmark").expect("invalid benchmark regex")
});

/// Standalone AJU token, matched against the uppercased line.
static STANDALONE_AJU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAJU\b").expect("invalid adjustment regex"));

/// Classify a file from its first metadata line.
///
/// When both an operating system and the domain-controller mention are
/// found, the suffix is appended here, once, for the whole file.
pub fn classify_first_line(first_line: &str) -> FileClassification {
    let upper = first_line.to_uppercase();
    let adjusted = upper.contains("AJUSTADA") || STANDALONE_AJU.is_match(&upper);
    let domain_controller = upper.contains("DOMAIN CONTROLLER");
    let mut operating_system = extract_operating_system(first_line);
    if domain_controller
        && let Some(os) = operating_system.as_mut()
    {
        os.push_str(" Domain Controller");
    }
    FileClassification {
        adjusted,
        operating_system,
        domain_controller,
    }
}

fn extract_operating_system(first_line: &str) -> Option<String> {
    for pattern in [&*OS_BENCHMARK_FOR, &*OS_BENCHMARK] {
        if let Some(captures) = pattern.captures(first_line) {
            return Some(captures[1].trim().to_string());
        }
    }
    None
}
