//! Terminal progress rendering.
//!
//! Two renderers implement [`ProgressSink`]: `ConsoleProgress` draws an
//! indicatif bar when stderr is a terminal, `TracingProgress` turns the
//! same events into log records for non-interactive runs.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use scanrep_model::{Phase, ProgressEvent, ProgressSink};

/// Pick the renderer appropriate for the current stderr.
pub fn stderr_progress() -> Box<dyn ProgressSink> {
    if io::stderr().is_terminal() {
        Box::new(ConsoleProgress::new())
    } else {
        Box::new(TracingProgress)
    }
}

/// Byte-position bar with a throughput message, one file at a time.
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
    current_file: String,
    phase: Phase,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            bar: None,
            current_file: String::new(),
            phase: Phase::Headers,
        }
    }

    fn start_file(&mut self, event: &ProgressEvent) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        let bar = ProgressBar::new(event.total_bytes);
        bar.set_style(bar_style(event.phase));
        bar.set_prefix(format!("{} {}", phase_label(event.phase), event.file));
        self.current_file = event.file.clone();
        self.phase = event.phase;
        self.bar = Some(bar);
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn emit(&mut self, event: ProgressEvent) {
        if self.bar.is_none() || event.file != self.current_file || event.phase != self.phase {
            self.start_file(&event);
        }
        if let Some(bar) = &self.bar {
            bar.set_position(event.bytes);
            bar.set_message(format!(
                "{} rows, {:.0} rows/s, {:.1} MB/s",
                event.rows,
                event.rows_per_sec(),
                event.mb_per_sec()
            ));
            if event.bytes >= event.total_bytes {
                bar.finish_and_clear();
                self.bar = None;
            }
        }
    }
}

/// Log-record renderer for piped or scripted runs.
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn emit(&mut self, event: ProgressEvent) {
        // Intermediate events would flood the log; report files as they finish.
        if event.bytes >= event.total_bytes {
            info!(
                file = %event.file,
                phase = ?event.phase,
                rows = event.rows,
                bytes = event.bytes,
                elapsed_secs = format_args!("{:.2}", event.elapsed_secs),
                "file complete"
            );
        }
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Headers => "scan",
        Phase::Data => "write",
    }
}

fn bar_style(phase: Phase) -> ProgressStyle {
    let template = match phase {
        Phase::Headers => {
            "{prefix:.cyan} [{bar:30.cyan/blue}] {bytes}/{total_bytes} {msg:.dim}"
        }
        Phase::Data => {
            "{prefix:.green} [{bar:30.green/blue}] {bytes}/{total_bytes} {msg:.dim}"
        }
    };
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
