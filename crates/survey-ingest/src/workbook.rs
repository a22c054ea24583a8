//! Spreadsheet workbook reading.
//!
//! Sheets are read as string grids: the first row is the header, every cell
//! is converted to text. Used both for the survey table and for reading back
//! exported project workbooks.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};

use crate::error::{IngestError, Result};
use crate::frame::format_numeric;

/// One worksheet as header plus string rows.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Values of a named column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Consumes the grid into named columns (column-major).
    pub fn into_columns(self) -> Vec<(String, Vec<String>)> {
        let height = self.rows.len();
        let mut columns: Vec<(String, Vec<String>)> = self
            .headers
            .into_iter()
            .map(|header| (header, Vec::with_capacity(height)))
            .collect();
        for row in self.rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.1.push(value);
            }
        }
        columns
    }
}

type WorkbookSheets = Sheets<BufReader<File>>;

fn open(path: &Path) -> Result<WorkbookSheets> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads the first sheet whose name contains `pattern`.
pub fn read_sheet_matching(path: &Path, pattern: &str) -> Result<SheetGrid> {
    let mut workbook = open(path)?;
    let sheet = workbook
        .sheet_names()
        .into_iter()
        .find(|name| name.contains(pattern))
        .ok_or_else(|| IngestError::MissingSheet {
            path: path.to_path_buf(),
            pattern: pattern.to_string(),
        })?;
    read_open_sheet(&mut workbook, path, &sheet)
}

/// Reads every sheet, in workbook order.
pub fn read_all_sheets(path: &Path) -> Result<Vec<SheetGrid>> {
    let mut workbook = open(path)?;
    let names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        sheets.push(read_open_sheet(&mut workbook, path, &name)?);
    }
    Ok(sheets)
}

fn read_open_sheet(workbook: &mut WorkbookSheets, path: &Path, sheet: &str) -> Result<SheetGrid> {
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: format!("sheet '{sheet}': {e}"),
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(SheetGrid {
            name: sheet.to_string(),
            ..SheetGrid::default()
        });
    };
    let headers = unique_headers(
        header_row
            .iter()
            .map(|cell| normalize_header(&data_to_string(cell))),
    );
    let width = headers.len();

    let mut grid_rows = Vec::with_capacity(range.height().saturating_sub(1));
    for row in rows {
        let mut values: Vec<String> = row.iter().take(width).map(data_to_string).collect();
        values.resize(width, String::new());
        if values.iter().all(String::is_empty) {
            continue;
        }
        grid_rows.push(values);
    }

    tracing::debug!(
        path = %path.display(),
        sheet,
        columns = width,
        rows = grid_rows.len(),
        "read worksheet"
    );

    Ok(SheetGrid {
        name: sheet.to_string(),
        headers,
        rows: grid_rows,
    })
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Blank headers become `Unnamed: {idx}`; repeats get `.1`, `.2`, ...
fn unique_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut taken = HashSet::new();
    let mut headers = Vec::new();
    for (idx, header) in raw.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

/// Converts a workbook cell to text.
///
/// Integral floats lose their `.0` so numeric codes and years read back the
/// way they were typed.
pub fn data_to_string(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::Bool(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_numeric(*v),
        Data::String(v) => v.clone(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(v) => format_numeric(v.as_f64()),
        Data::DateTimeIso(v) => v.clone(),
        Data::DurationIso(v) => v.clone(),
    }
}
