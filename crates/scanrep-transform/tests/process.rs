//! End-to-end tests for pass-2 materialization over real files.

use std::io::Write as _;
use std::path::PathBuf;

use encoding_rs::UTF_8;
use tempfile::NamedTempFile;

use scanrep_ingest::scan_headers;
use scanrep_model::{HeaderUnion, NullProgress, ProgressEvent, RunDate};
use scanrep_output::{FinalizedSchemas, OutputSinks, RunCounters};
use scanrep_transform::process_file;

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn discover(files: &[&NamedTempFile]) -> FinalizedSchemas {
    let mut union = HeaderUnion::new();
    for file in files {
        let file_union = scan_headers(file.path(), UTF_8, &mut NullProgress).unwrap();
        union.merge(&file_union);
    }
    FinalizedSchemas::from_union(&union)
}

fn run_to_files(
    files: &[&NamedTempFile],
    schemas: &FinalizedSchemas,
    date: RunDate,
    dir: &tempfile::TempDir,
) -> scanrep_output::SinkPaths {
    let paths = scanrep_output::SinkPaths::for_run(dir.path(), "Acme", date);
    let mut sinks = OutputSinks::create(&paths).unwrap();
    let mut counters = RunCounters::new();
    for file in files {
        process_file(
            file.path(),
            UTF_8,
            schemas,
            "Acme",
            date,
            &mut sinks,
            &mut counters,
            &mut NullProgress,
        )
        .unwrap();
    }
    sinks.flush().unwrap();
    paths
}

fn read(path: &PathBuf) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn round_trip_injects_derived_columns() {
    let file = fixture(
        "CIS Benchmark for Windows Server 2019 v1.2.0\n\
         RESULTS\n\
         host,ip\n\
         h1,10.0.0.1\n",
    );
    let schemas = discover(&[&file]);
    let date = RunDate::parse("2024-03-07").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let paths = run_to_files(&[&file], &schemas, date, &dir);

    let output = read(&paths.t2_normal);
    let mut lines = output.lines();
    assert_eq!(
        lines.next().unwrap(),
        "host,ip,Operating System,scan_name,periodo"
    );
    assert_eq!(
        lines.next().unwrap(),
        "h1,10.0.0.1,,Acme-hardening-2024-marzo-07,7/3/2024"
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn header_appears_once_across_multiple_files() {
    let a = fixture("meta\nRESULTS\nhost,ip\nh1,10.0.0.1\n");
    let b = fixture("meta\nRESULTS\nhost,score\nh2,77\n");
    let schemas = discover(&[&a, &b]);
    let date = RunDate::parse("2024-03-07").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let paths = run_to_files(&[&a, &b], &schemas, date, &dir);

    let output = read(&paths.t2_normal);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "host,ip,score,Operating System,scan_name,periodo");
    assert!(lines[1].starts_with("h1,10.0.0.1,,"));
    // File b has no `ip` column; the unified schema leaves it empty.
    assert!(lines[2].starts_with("h2,,77,"));
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("host,ip")).count(),
        1
    );
}

#[test]
fn adjusted_files_route_to_the_ajustada_sinks() {
    let adjusted = fixture(
        "export AJUSTADA\n\
         Control Statistics\n\
         control,result\n\
         1.1,PASS\n",
    );
    let normal = fixture(
        "export normal\n\
         Control Statistics\n\
         control,result\n\
         2.2,FAIL\n",
    );
    let schemas = discover(&[&adjusted, &normal]);
    let date = RunDate::parse("2024-03-07").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let paths = run_to_files(&[&adjusted, &normal], &schemas, date, &dir);

    let ajustada = read(&paths.t1_ajustada);
    assert!(ajustada.contains("1.1,PASS"));
    assert!(ajustada.contains("-ajustado"));
    assert!(!ajustada.contains("2.2"));

    let normal_out = read(&paths.t1_normal);
    assert!(normal_out.contains("2.2,FAIL"));
    assert!(normal_out.contains("Acme-hardening-control-statics-2024-marzo-07,"));
    assert!(!normal_out.contains("-ajustado"));
}

#[test]
fn domain_controller_suffixes_results_os_per_row() {
    let file = fixture(
        "CIS Benchmark for Windows Server 2019 v1.2 DOMAIN CONTROLLER\n\
         RESULTS\n\
         host,Operating System\n\
         h1,Windows Server 2019\n\
         h2,\n\
         \n\
         Control Statistics\n\
         control\n\
         1.1\n",
    );
    let schemas = discover(&[&file]);
    let date = RunDate::parse("2024-03-07").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let paths = run_to_files(&[&file], &schemas, date, &dir);

    let results = read(&paths.t2_normal);
    assert!(results.contains("h1,Windows Server 2019 Domain Controller,"));
    assert!(results.contains("h2,Domain Controller,"));

    // Control-statistics rows take the classified OS, suffix included.
    let stats = read(&paths.t1_normal);
    assert!(stats.contains("1.1,Windows Server 2019 Domain Controller,"));
}

#[test]
fn multiple_tables_and_blank_separators_stay_delimited() {
    let file = fixture(
        "meta\n\
         Control Statistics\n\
         a,b\n\
         1,2\n\
         3,4\n\
         \n\
         RESULTS\n\
         host\n\
         h1\n",
    );
    let schemas = discover(&[&file]);
    let date = RunDate::parse("2024-01-02").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let paths = run_to_files(&[&file], &schemas, date, &dir);

    let stats = read(&paths.t1_normal);
    assert_eq!(stats.lines().count(), 3); // header + two rows
    let results = read(&paths.t2_normal);
    assert_eq!(results.lines().count(), 2); // header + one row
}

#[test]
fn short_and_long_rows_are_tolerated() {
    let file = fixture(
        "meta\n\
         RESULTS\n\
         a,b,c\n\
         1\n\
         1,2,3,4,5\n",
    );
    let schemas = discover(&[&file]);
    let date = RunDate::parse("2024-01-02").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let paths = run_to_files(&[&file], &schemas, date, &dir);

    let results = read(&paths.t2_normal);
    let lines: Vec<&str> = results.lines().collect();
    assert!(lines[1].starts_with("1,,,"));
    assert!(lines[2].starts_with("1,2,3,"));
    assert!(!lines[2].contains('4'));
}

#[test]
fn empty_file_emits_single_progress_event() {
    let file = fixture("");
    let schemas = discover(&[&file]);
    let date = RunDate::parse("2024-01-02").unwrap();
    let mut sinks = OutputSinks::from_writers(Vec::new(), Vec::new(), Vec::new(), Vec::new());
    let mut counters = RunCounters::new();
    let mut events: Vec<ProgressEvent> = Vec::new();
    process_file(
        file.path(),
        UTF_8,
        &schemas,
        "Acme",
        date,
        &mut sinks,
        &mut counters,
        &mut |event: ProgressEvent| events.push(event),
    )
    .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].rows, 0);
    assert_eq!(counters.total_rows(), 0);
}

#[test]
fn marker_without_header_line_ends_file_gracefully() {
    let file = fixture("meta\nRESULTS\n");
    let schemas = discover(&[&file]);
    let date = RunDate::parse("2024-01-02").unwrap();
    let mut sinks = OutputSinks::from_writers(Vec::new(), Vec::new(), Vec::new(), Vec::new());
    let mut counters = RunCounters::new();
    process_file(
        file.path(),
        UTF_8,
        &schemas,
        "Acme",
        date,
        &mut sinks,
        &mut counters,
        &mut NullProgress,
    )
    .unwrap();
    assert_eq!(counters.total_rows(), 0);
}
