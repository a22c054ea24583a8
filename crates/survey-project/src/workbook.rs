//! In-memory project workbook.

use survey_ingest::SheetGrid;

use crate::names::CODE_COLUMN;

/// One theme sheet: a header row and string rows of equal width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ProjectSheet {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Non-blank, trimmed values of the code column; `None` without one.
    pub fn codes(&self) -> Option<Vec<String>> {
        let idx = self.column_index(CODE_COLUMN)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl From<SheetGrid> for ProjectSheet {
    fn from(grid: SheetGrid) -> Self {
        Self {
            name: grid.name,
            headers: grid.headers,
            rows: grid.rows,
        }
    }
}

/// Countries from the info sheet plus one sheet per exported theme, in
/// workbook order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectWorkbook {
    pub countries: Vec<String>,
    pub sheets: Vec<ProjectSheet>,
}
