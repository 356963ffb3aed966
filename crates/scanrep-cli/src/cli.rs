//! CLI argument definitions for the scan report normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "scanrep",
    version,
    about = "Normalize hardening scan report exports into per-table CSVs",
    long_about = "Normalize multi-table CSV exports from hardening scans.\n\n\
                  Merges control-statistics and result tables from any number of\n\
                  report files into four schema-unified CSVs, splitting adjusted\n\
                  baselines from standard ones."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process report files into the four merged CSV outputs.
    Process(ProcessArgs),

    /// Show how a single report file would be decoded and classified.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Report CSV files to process.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Client name used in output file names and derived columns.
    #[arg(long = "client", value_name = "NAME")]
    pub client: String,

    /// Scan date as YYYY-MM-DD.
    #[arg(long = "date", value_name = "DATE")]
    pub date: String,

    /// Output directory for the merged CSVs (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Decode every input with this codec instead of detecting per file.
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Write a machine-readable run summary to this JSON file.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Report CSV file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Decode with this codec instead of detecting.
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
