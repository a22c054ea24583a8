//! XLSX backend for project workbooks.

use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use survey_ingest::read_all_sheets;

use crate::error::{ProjectError, Result};
use crate::names::{INFO_COUNTRY_COLUMN, INFO_SHEET};
use crate::workbook::{ProjectSheet, ProjectWorkbook};

/// Writes the info sheet followed by every theme sheet, in order.
pub fn save_project(project: &ProjectWorkbook, path: &Path) -> Result<()> {
    let write_err = |source: XlsxError| ProjectError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let info_rows: Vec<Vec<String>> = project
        .countries
        .iter()
        .map(|country| vec![country.clone()])
        .collect();
    write_sheet(
        workbook.add_worksheet(),
        INFO_SHEET,
        &[INFO_COUNTRY_COLUMN.to_string()],
        &info_rows,
        &header_format,
    )
    .map_err(write_err)?;

    for sheet in &project.sheets {
        write_sheet(
            workbook.add_worksheet(),
            &sheet.name,
            &sheet.headers,
            &sheet.rows,
            &header_format,
        )
        .map_err(write_err)?;
    }

    workbook.save(path).map_err(write_err)?;
    tracing::info!(
        path = %path.display(),
        sheets = project.sheets.len() + 1,
        "saved project workbook"
    );
    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    headers: &[String],
    rows: &[Vec<String>],
    header_format: &Format,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(name)?;
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, cast_col_num(col_idx)?, header, header_format)?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = cast_row_num(row_idx + 1)?;
        for (col_idx, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(row_num, cast_col_num(col_idx)?, value)?;
            }
        }
    }
    worksheet.autofit();
    Ok(())
}

fn cast_row_num(idx: usize) -> std::result::Result<RowNum, XlsxError> {
    RowNum::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn cast_col_num(idx: usize) -> std::result::Result<ColNum, XlsxError> {
    ColNum::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Reads a project workbook.
///
/// The info sheet is optional; without it (or without its country column)
/// the project lists no countries. Every other sheet is returned as-is, in
/// workbook order.
pub fn load_project(path: &Path) -> Result<ProjectWorkbook> {
    let mut project = ProjectWorkbook::default();
    for grid in read_all_sheets(path)? {
        if grid.name == INFO_SHEET {
            match grid.column_values(INFO_COUNTRY_COLUMN) {
                Some(values) => {
                    project.countries = values
                        .into_iter()
                        .map(str::trim)
                        .filter(|value| !value.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                None => {
                    tracing::debug!(
                        path = %path.display(),
                        column = INFO_COUNTRY_COLUMN,
                        "info sheet has no country column"
                    );
                }
            }
            continue;
        }
        project.sheets.push(ProjectSheet::from(grid));
    }
    tracing::info!(
        path = %path.display(),
        sheets = project.sheets.len(),
        countries = project.countries.len(),
        "loaded project workbook"
    );
    Ok(project)
}
