use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use faixa_core::MacroOutcome;

use crate::types::{ActionResult, ShowResult};

pub fn print_action(result: &ActionResult) {
    println!("Workbook: {}", result.workbook_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Action"),
        header_cell("Status"),
        header_cell("Sheet"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    let outcome = &result.report.outcome;
    table.add_row(vec![
        Cell::new(result.report.action).add_attribute(Attribute::Bold),
        status_cell(outcome),
        outcome_sheet(outcome).map_or_else(|| dim_cell("-"), Cell::new),
        Cell::new(outcome.message()),
    ]);
    println!("{table}");
    if result.saved_sheets > 0 {
        println!("Saved {} sheet(s).", result.saved_sheets);
    }
    if let Some(file) = &result.export_file {
        println!("Wrote {} row(s) to {}", file.rows, file.path.display());
    }
}

pub fn print_show(result: &ShowResult) {
    println!("Workbook: {}", result.workbook_dir.display());
    println!("Sheet: {}", result.sheet);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Linha"),
        header_cell("Dia"),
        header_cell("Sentido"),
        header_cell("Bands"),
        header_cell("First start"),
        header_cell("Last end"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_bands = 0usize;
    for block in &result.overview.blocks {
        total_bands += block.bands.len();
        table.add_row(vec![
            Cell::new(&block.line).fg(Color::Green),
            Cell::new(&block.day),
            Cell::new(&block.direction),
            Cell::new(block.bands.len()),
            block.first_start().map_or_else(|| dim_cell("-"), Cell::new),
            block.last_end().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_bands).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    println!("Service orders: {}", result.overview.service_orders);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn outcome_sheet(outcome: &MacroOutcome) -> Option<&str> {
    match outcome {
        MacroOutcome::Appended { sheet, .. }
        | MacroOutcome::Cleared { sheet, .. }
        | MacroOutcome::Exported { sheet, .. } => Some(sheet),
        MacroOutcome::Cancelled | MacroOutcome::Failed { .. } => None,
    }
}

fn status_cell(outcome: &MacroOutcome) -> Cell {
    let (label, color) = match outcome {
        MacroOutcome::Appended { .. } => ("appended", Color::Green),
        MacroOutcome::Cleared { .. } => ("cleared", Color::Green),
        MacroOutcome::Exported { .. } => ("exported", Color::Green),
        MacroOutcome::Cancelled => ("cancelled", Color::Yellow),
        MacroOutcome::Failed { .. } => ("failed", Color::Red),
    };
    Cell::new(label).fg(color).add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
