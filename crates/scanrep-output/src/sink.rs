//! The four typed output sinks of a run.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use scanrep_model::{RunDate, SinkKey};

use crate::error::{OutputError, Result};

/// One CSV output stream. Values containing the delimiter, quotes, or
/// newlines are quoted on write by the underlying csv writer.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Write the finalized schema as the stream's header line.
    pub fn write_header(&mut self, schema: &[String]) -> Result<()> {
        self.writer.write_record(schema)?;
        Ok(())
    }

    /// Write one data row as an ordered projection of the record onto the
    /// schema. Schema columns absent from the record are written empty.
    pub fn write_row(&mut self, schema: &[String], record: &BTreeMap<String, String>) -> Result<()> {
        self.writer.write_record(
            schema
                .iter()
                .map(|column| record.get(column).map_or("", String::as_str)),
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|source| OutputError::Flush { source })
    }

    /// Consume the sink, returning the inner writer (used by tests).
    pub fn into_inner(self) -> std::result::Result<W, csv::IntoInnerError<csv::Writer<W>>> {
        self.writer.into_inner()
    }
}

/// Output file locations of a run, one per sink key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkPaths {
    pub t1_normal: PathBuf,
    pub t1_ajustada: PathBuf,
    pub t2_normal: PathBuf,
    pub t2_ajustada: PathBuf,
}

impl SinkPaths {
    /// Conventional output names for a run:
    /// `{client}-hardening-control-statics-{date}[-ajustada].csv` and
    /// `{client}-hardening-result-{date}[-ajustada].csv`.
    pub fn for_run(output_dir: &Path, client: &str, date: RunDate) -> Self {
        let base = format!("{client}-hardening");
        Self {
            t1_normal: output_dir.join(format!("{base}-control-statics-{date}.csv")),
            t1_ajustada: output_dir.join(format!("{base}-control-statics-{date}-ajustada.csv")),
            t2_normal: output_dir.join(format!("{base}-result-{date}.csv")),
            t2_ajustada: output_dir.join(format!("{base}-result-{date}-ajustada.csv")),
        }
    }

    pub fn path(&self, key: SinkKey) -> &Path {
        match key {
            SinkKey::T1Normal => &self.t1_normal,
            SinkKey::T1Ajustada => &self.t1_ajustada,
            SinkKey::T2Normal => &self.t2_normal,
            SinkKey::T2Ajustada => &self.t2_ajustada,
        }
    }
}

/// The closed set of four sink handles of a run. Each sink is written by
/// exactly one logical stream; handles are never shared across sinks.
pub struct OutputSinks<W: Write> {
    t1_normal: CsvSink<W>,
    t1_ajustada: CsvSink<W>,
    t2_normal: CsvSink<W>,
    t2_ajustada: CsvSink<W>,
}

impl OutputSinks<File> {
    /// Create the four output files, creating parent directories as
    /// needed.
    pub fn create(paths: &SinkPaths) -> Result<Self> {
        tracing::debug!(
            t1_normal = %paths.t1_normal.display(),
            t2_normal = %paths.t2_normal.display(),
            "creating output sinks"
        );
        Ok(Self {
            t1_normal: CsvSink::new(create_file(&paths.t1_normal)?),
            t1_ajustada: CsvSink::new(create_file(&paths.t1_ajustada)?),
            t2_normal: CsvSink::new(create_file(&paths.t2_normal)?),
            t2_ajustada: CsvSink::new(create_file(&paths.t2_ajustada)?),
        })
    }
}

impl<W: Write> OutputSinks<W> {
    /// Assemble sinks from raw writers (used by tests and in-memory
    /// callers).
    pub fn from_writers(t1_normal: W, t1_ajustada: W, t2_normal: W, t2_ajustada: W) -> Self {
        Self {
            t1_normal: CsvSink::new(t1_normal),
            t1_ajustada: CsvSink::new(t1_ajustada),
            t2_normal: CsvSink::new(t2_normal),
            t2_ajustada: CsvSink::new(t2_ajustada),
        }
    }

    pub fn get_mut(&mut self, key: SinkKey) -> &mut CsvSink<W> {
        match key {
            SinkKey::T1Normal => &mut self.t1_normal,
            SinkKey::T1Ajustada => &mut self.t1_ajustada,
            SinkKey::T2Normal => &mut self.t2_normal,
            SinkKey::T2Ajustada => &mut self.t2_ajustada,
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        for key in SinkKey::ALL {
            self.get_mut(key).flush()?;
        }
        Ok(())
    }
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Create {
            path: path.to_path_buf(),
            source,
        })?;
    }
    File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn writes_rows_in_schema_order_with_empty_defaults() {
        let schema = cols(&["host", "ip", "scan_name"]);
        let mut sink = CsvSink::new(Vec::new());
        sink.write_header(&schema).unwrap();
        let mut record = BTreeMap::new();
        record.insert("ip".to_string(), "10.0.0.1".to_string());
        record.insert("host".to_string(), "h1".to_string());
        record.insert("ignored".to_string(), "x".to_string());
        sink.write_row(&schema, &record).unwrap();
        let bytes = sink.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "host,ip,scan_name\nh1,10.0.0.1,\n"
        );
    }

    #[test]
    fn quotes_values_containing_delimiters_and_newlines() {
        let schema = cols(&["a", "b"]);
        let mut sink = CsvSink::new(Vec::new());
        let mut record = BTreeMap::new();
        record.insert("a".to_string(), "one,two".to_string());
        record.insert("b".to_string(), "line1\nline2".to_string());
        sink.write_row(&schema, &record).unwrap();
        let bytes = sink.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\"one,two\",\"line1\nline2\"\n"
        );
    }

    #[test]
    fn run_paths_follow_output_naming_convention() {
        let date = RunDate::parse("2024-03-07").unwrap();
        let paths = SinkPaths::for_run(Path::new("out"), "Acme", date);
        assert_eq!(
            paths.t1_normal,
            Path::new("out/Acme-hardening-control-statics-2024-03-07.csv")
        );
        assert_eq!(
            paths.t2_ajustada,
            Path::new("out/Acme-hardening-result-2024-03-07-ajustada.csv")
        );
        assert_eq!(paths.path(SinkKey::T2Normal), paths.t2_normal.as_path());
    }

    #[test]
    fn creates_files_in_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let date = RunDate::parse("2024-01-02").unwrap();
        let paths = SinkPaths::for_run(&dir.path().join("nested/run"), "c", date);
        let mut sinks = OutputSinks::create(&paths).unwrap();
        sinks
            .get_mut(SinkKey::T1Normal)
            .write_header(&cols(&["a"]))
            .unwrap();
        sinks.flush().unwrap();
        assert_eq!(
            std::fs::read_to_string(&paths.t1_normal).unwrap(),
            "a\n"
        );
        assert!(paths.t2_ajustada.exists());
    }
}
