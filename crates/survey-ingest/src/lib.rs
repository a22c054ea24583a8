//! Survey input loading.
//!
//! This crate locates and loads the two startup inputs:
//!
//! - **Question catalog**: CSV with `question_code`, `question_name`, `theme`
//! - **Survey table**: respondent-level data (XLSX sheet containing `Survey`,
//!   or CSV), one column per question code plus a combined country/year field
//!
//! It also exposes the generic workbook reader used to read exported project
//! workbooks back in.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use survey_ingest::{load_inputs, locate_inputs};
//!
//! let files = locate_inputs(Path::new("data"), None, None)?;
//! let inputs = load_inputs(&files)?;
//! println!("{} questions", inputs.catalog.len());
//! ```

mod catalog;
mod discovery;
mod error;
mod frame;
mod survey;
mod workbook;

use survey_model::{Catalog, ObservationTable};

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{
    CATALOG_CANDIDATES, DATA_CANDIDATES, InputFiles, InputKind, locate_input, locate_inputs,
};

// === Catalog ===
pub use catalog::{load_catalog, parse_catalog};

// === Survey Table ===
pub use survey::{
    COUNTRY_COLUMN, COUNTRY_YEAR_COLUMN, SURVEY_SHEET_PATTERN, TableFormat, YEAR_COLUMN,
    load_survey_table,
};

// === Workbooks ===
pub use frame::{any_to_string, format_numeric};
pub use workbook::{SheetGrid, data_to_string, read_all_sheets, read_sheet_matching};

/// Both startup inputs, loaded.
#[derive(Debug, Clone)]
pub struct SurveyInputs {
    pub catalog: Catalog,
    pub table: ObservationTable,
}

/// Loads the catalog and survey table from resolved paths.
pub fn load_inputs(files: &InputFiles) -> Result<SurveyInputs> {
    let catalog = load_catalog(&files.catalog)?;
    let table = load_survey_table(&files.data)?;
    Ok(SurveyInputs { catalog, table })
}
