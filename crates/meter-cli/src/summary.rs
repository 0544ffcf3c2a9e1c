use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use meter_core::{Assembly, SourceSummary};

/// Prints per-source row accounting to stderr, keeping stdout for data.
pub fn print_load_summary(assembly: &Assembly) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Read"),
        header_cell("Tagged cells"),
        header_cell("Incomplete"),
        header_cell("Out of range"),
        header_cell("Kept"),
        header_cell("Output rows"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for source in &assembly.sources {
        table.add_row(vec![
            Cell::new(source_label(source)),
            Cell::new(source.stats.rows_read),
            count_cell(source.stats.cells_tagged, Color::Yellow),
            count_cell(source.stats.incomplete_rows, Color::Yellow),
            count_cell(source.stats.out_of_range_rows, Color::Red),
            Cell::new(source.stats.rows_kept),
            Cell::new(source.rows_out),
        ]);
    }

    let totals = assembly.totals();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals.rows_read).add_attribute(Attribute::Bold),
        count_cell(totals.cells_tagged, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals.incomplete_rows, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals.out_of_range_rows, Color::Red).add_attribute(Attribute::Bold),
        Cell::new(totals.rows_kept).add_attribute(Attribute::Bold),
        Cell::new(assembly.data.height()).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");

    if !assembly.skipped.is_empty() {
        eprintln!("Skipped:");
        for skipped in &assembly.skipped {
            eprintln!("- {}: {}", skipped.path.display(), skipped.reason);
        }
    }
}

fn source_label(source: &SourceSummary) -> String {
    let location = source
        .location
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.location.display().to_string());
    let file = source
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{location}/{file}")
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
