//! Terminal rendering of matrices, theme lists and import results.

use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_core::{AvailabilityCell, AvailabilityMatrix, AvailableCodes, EMPTY_CELL};
use survey_project::{CODE_COLUMN, ImportSummary, NAME_COLUMN};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Matrix as a styled table: code, name, then one column per country.
pub fn matrix_table(matrix: &AvailabilityMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell(CODE_COLUMN), header_cell(NAME_COLUMN)];
    header.extend(matrix.countries.iter().map(|country| header_cell(country)));
    table.set_header(header);
    apply_table_style(&mut table);
    for row in &matrix.rows {
        let mut cells = vec![
            Cell::new(&row.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&row.name),
        ];
        cells.extend(row.cells.iter().map(|cell| {
            if cell.is_empty() {
                dim_cell(EMPTY_CELL)
            } else {
                Cell::new(cell.render())
            }
        }));
        table.add_row(cells);
    }
    table
}

/// Matrix as tab-separated lines with a header line.
pub fn matrix_plain(matrix: &AvailabilityMatrix) -> String {
    let mut lines = Vec::with_capacity(matrix.rows.len() + 1);
    let mut header = vec![CODE_COLUMN, NAME_COLUMN];
    header.extend(matrix.countries.iter().map(String::as_str));
    lines.push(header.join("\t"));
    for row in &matrix.rows {
        let mut fields = vec![row.code.clone(), row.name.clone()];
        fields.extend(row.cells.iter().map(AvailabilityCell::render));
        lines.push(fields.join("\t"));
    }
    lines.join("\n")
}

pub fn matrix_json(matrix: &AvailabilityMatrix) -> serde_json::Result<String> {
    serde_json::to_string_pretty(matrix)
}

/// Every catalog theme with its data-backed and total question counts.
pub fn themes_table(available: &AvailableCodes) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Theme"),
        header_cell("With data"),
        header_cell("In catalog"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for theme in available.themes() {
        let with_data = available.valid_codes(theme).len();
        let with_data_cell = if with_data == 0 {
            dim_cell(with_data)
        } else {
            Cell::new(with_data)
        };
        table.add_row(vec![
            Cell::new(theme),
            with_data_cell,
            Cell::new(available.catalog_count(theme)),
        ]);
    }
    table
}

/// `theme: code, code` lines, themes sorted.
pub fn active_themes_plain(active: &BTreeMap<String, Vec<String>>) -> String {
    active
        .iter()
        .map(|(theme, codes)| format!("{theme}: {}", codes.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn import_summary_plain(summary: &ImportSummary, countries: &[String]) -> String {
    let mut lines = vec![
        format!(
            "Loaded {} of {} sheets",
            summary.themes_loaded, summary.sheets_seen
        ),
        format!(
            "Countries{}: {}",
            if summary.countries_applied {
                ""
            } else {
                " (unchanged)"
            },
            if countries.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                countries.join(", ")
            }
        ),
    ];
    if !summary.skipped.is_empty() {
        lines.push(format!("Skipped: {}", summary.skipped.join(", ")));
    }
    lines.join("\n")
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
