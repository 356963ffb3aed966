//! Subcommand entry points.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use encoding_rs::Encoding;
use tracing::info;

use scanrep_ingest::{
    DecodedLineReader, PushbackLines, TableLines, classify_first_line, classify_marker,
    detect_encoding, parse_csv_line, resolve_codec,
};
use scanrep_model::RunDate;

use scanrep_cli::pipeline::{RunRequest, run};
use scanrep_cli::progress::stderr_progress;
use scanrep_cli::summary::apply_table_style;
use scanrep_cli::types::RunReport;

use crate::cli::{InspectArgs, ProcessArgs};

pub fn run_process(args: &ProcessArgs) -> Result<RunReport> {
    let date = RunDate::parse(&args.date)
        .with_context(|| format!("invalid --date value {:?}", args.date))?;
    let forced_encoding = args
        .encoding
        .as_deref()
        .map(|label| resolve_codec(label).with_context(|| format!("invalid --encoding {label:?}")))
        .transpose()?;
    let request = RunRequest {
        files: args.files.clone(),
        client: args.client.clone(),
        date,
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".")),
        forced_encoding,
    };
    let mut progress = stderr_progress();
    let report = run(&request, progress.as_mut())?;
    if let Some(path) = &args.summary_json {
        let json = serde_json::to_string_pretty(&report).context("serialize run summary")?;
        fs::write(path, json).with_context(|| format!("write summary to {}", path.display()))?;
        info!(path = %path.display(), "run summary written");
    }
    Ok(report)
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let encoding: &'static Encoding = match args.encoding.as_deref() {
        Some(label) => {
            resolve_codec(label).with_context(|| format!("invalid --encoding {label:?}"))?
        }
        None => detect_encoding(&args.file)
            .with_context(|| format!("detect encoding of {}", args.file.display()))?,
    };
    println!("File: {}", args.file.display());
    println!("Encoding: {}", encoding.name());

    let reader = DecodedLineReader::open(&args.file, encoding)?;
    let mut src = PushbackLines::new(reader);
    let Some(first_line) = src.next_line()? else {
        println!("Empty file.");
        return Ok(());
    };
    let classification = classify_first_line(&first_line);
    println!(
        "Adjusted: {}",
        if classification.adjusted { "yes" } else { "no" }
    );
    println!(
        "Operating system: {}",
        classification
            .operating_system
            .as_deref()
            .unwrap_or("(none detected)")
    );
    println!(
        "Domain controller: {}",
        if classification.domain_controller {
            "yes"
        } else {
            "no"
        }
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Table", "Columns", "Rows"]);
    apply_table_style(&mut table);
    let mut index = 0usize;
    while let Some(line) = src.next_line()? {
        let Some(kind) = classify_marker(&line) else {
            continue;
        };
        index += 1;
        let Some(header_line) = src.next_line()? else {
            table.add_row(vec![
                index.to_string(),
                kind.describe().to_string(),
                "0".to_string(),
                "0".to_string(),
            ]);
            break;
        };
        let columns = parse_csv_line(&header_line).len();
        let mut rows = 0usize;
        for row in TableLines::new(&mut src) {
            row?;
            rows += 1;
        }
        table.add_row(vec![
            index.to_string(),
            kind.describe().to_string(),
            columns.to_string(),
            rows.to_string(),
        ]);
    }
    if index == 0 {
        println!("No tables found.");
    } else {
        println!("{table}");
    }
    Ok(())
}
