//! Question catalog loading.

use std::path::Path;

use survey_model::{Catalog, QuestionMeta};

use crate::error::{IngestError, Result};

pub const CODE_COLUMN: &str = "question_code";
pub const NAME_COLUMN: &str = "question_name";
pub const THEME_COLUMN: &str = "theme";

fn normalize_header(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

fn header_index(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| normalize_header(header) == name)
        .ok_or_else(|| IngestError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
}

fn get_string(row: &csv::StringRecord, idx: usize) -> String {
    row.get(idx).map(str::trim).unwrap_or_default().to_string()
}

/// Loads the question catalog from a CSV file.
///
/// Requires `question_code`, `question_name` and `theme` headers. Rows with an
/// empty code are skipped and duplicate codes keep their first occurrence.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&bytes, path)
}

/// Parses catalog CSV bytes; `path` is only used in error messages.
pub fn parse_catalog(bytes: &[u8], path: &Path) -> Result<Catalog> {
    let csv_error = |err: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let idx_code = header_index(&headers, CODE_COLUMN, path)?;
    let idx_name = header_index(&headers, NAME_COLUMN, path)?;
    let idx_theme = header_index(&headers, THEME_COLUMN, path)?;

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let code = get_string(&row, idx_code);
        if code.is_empty() {
            skipped += 1;
            continue;
        }
        entries.push(QuestionMeta {
            code,
            name: get_string(&row, idx_name),
            theme: get_string(&row, idx_theme),
        });
    }

    let rows = entries.len();
    let catalog = Catalog::from_entries(entries);
    tracing::info!(
        path = %path.display(),
        questions = catalog.len(),
        duplicates = rows - catalog.len(),
        skipped,
        themes = catalog.themes().len(),
        "loaded question catalog"
    );
    Ok(catalog)
}
