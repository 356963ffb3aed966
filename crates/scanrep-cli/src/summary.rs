//! End-of-run summary table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::RunReport;

pub fn print_summary(report: &RunReport) {
    println!("Client: {}", report.client);
    println!("Date: {}", report.date);
    println!("Output: {}", report.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Output"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for sink in &report.sinks {
        let file_name = sink
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| sink.path.display().to_string());
        table.add_row(vec![
            sink_cell(sink.key.as_str()),
            row_count_cell(sink.rows),
            Cell::new(sink.columns),
            Cell::new(file_name),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    if !report.failures.is_empty() {
        eprintln!("Skipped files:");
        for failure in &report.failures {
            eprintln!("- {}: {}", failure.path.display(), failure.error);
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn sink_cell(key: &str) -> Cell {
    Cell::new(key)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn row_count_cell(rows: u64) -> Cell {
    if rows == 0 {
        dim_cell(rows)
    } else {
        Cell::new(rows)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
