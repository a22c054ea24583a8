//! Survey table loading and country/year derivation.

use std::path::Path;

use survey_model::{CountryYearSource, ObservationTable};

use crate::error::{IngestError, Result};
use crate::frame::{frame_to_columns, read_csv_frame};
use crate::workbook::read_sheet_matching;

/// Substring identifying the survey sheet inside the data workbook.
pub const SURVEY_SHEET_PATTERN: &str = "Survey";

/// Combined `"<country> [<year>]"` column.
pub const COUNTRY_YEAR_COLUMN: &str = "S021";

/// Pre-split columns; when both exist the combined column is ignored.
pub const COUNTRY_COLUMN: &str = "Country_Name";
pub const YEAR_COLUMN: &str = "Year";

/// Supported survey table formats, by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Workbook,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Loads the survey table and derives each row's country and year.
///
/// Workbooks are read from the first sheet whose name contains
/// [`SURVEY_SHEET_PATTERN`]; CSV files are read whole. Rows whose combined
/// field does not parse keep country/year unset.
pub fn load_survey_table(path: &Path) -> Result<ObservationTable> {
    let format = TableFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let columns = match format {
        TableFormat::Csv => frame_to_columns(&read_csv_frame(path)?)?,
        TableFormat::Workbook => {
            let grid = read_sheet_matching(path, SURVEY_SHEET_PATTERN)?;
            if grid.headers.is_empty() {
                return Err(IngestError::EmptySheet {
                    path: path.to_path_buf(),
                    sheet: grid.name,
                });
            }
            grid.into_columns()
        }
    };

    let mut table =
        ObservationTable::from_columns(columns).map_err(|source| IngestError::Table {
            path: path.to_path_buf(),
            source,
        })?;

    let source = country_year_source(&table, path)?;
    let unassigned = table
        .assign_country_year(source)
        .map_err(|source| IngestError::Table {
            path: path.to_path_buf(),
            source,
        })?;

    if unassigned > 0 {
        tracing::debug!(
            path = %path.display(),
            rows = unassigned,
            "rows without country/year excluded from availability"
        );
    }
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        countries = table.countries().len(),
        unassigned,
        "loaded survey table"
    );
    Ok(table)
}

fn country_year_source(table: &ObservationTable, path: &Path) -> Result<CountryYearSource<'static>> {
    if table.has_column(COUNTRY_COLUMN) && table.has_column(YEAR_COLUMN) {
        return Ok(CountryYearSource::Columns {
            country: COUNTRY_COLUMN,
            year: YEAR_COLUMN,
        });
    }
    if table.has_column(COUNTRY_YEAR_COLUMN) {
        return Ok(CountryYearSource::Combined(COUNTRY_YEAR_COLUMN));
    }
    Err(IngestError::MissingColumn {
        column: COUNTRY_YEAR_COLUMN.to_string(),
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            TableFormat::from_path(&PathBuf::from("a/Survey.CSV")),
            Some(TableFormat::Csv)
        );
        assert_eq!(
            TableFormat::from_path(&PathBuf::from("Country_Questions_Table v02..xlsx")),
            Some(TableFormat::Workbook)
        );
        assert_eq!(TableFormat::from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(TableFormat::from_path(&PathBuf::from("README")), None);
    }
}
