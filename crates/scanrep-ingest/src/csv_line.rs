//! Single-line CSV field splitting.

/// Parse one CSV-encoded line into fields, respecting quoted fields that
/// contain delimiters.
///
/// Used for embedded table header rows, which occupy exactly one physical
/// line. Returns an empty vector for an unparseable or empty line.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_fields() {
        assert_eq!(parse_csv_line("host,ip,score"), vec!["host", "ip", "score"]);
    }

    #[test]
    fn respects_quoted_delimiters() {
        assert_eq!(
            parse_csv_line("\"Pass, Fail\",Total"),
            vec!["Pass, Fail", "Total"]
        );
    }

    #[test]
    fn unescapes_doubled_quotes() {
        assert_eq!(
            parse_csv_line("\"say \"\"hi\"\"\",x"),
            vec!["say \"hi\"", "x"]
        );
    }

    #[test]
    fn empty_line_yields_no_fields() {
        assert_eq!(parse_csv_line(""), Vec::<String>::new());
    }
}
