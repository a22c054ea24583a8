//! Project workbooks: saving and restoring a session's selections.
//!
//! A project workbook has an info sheet (`PROJE_BILGI`) listing the selected
//! countries and one sheet per active theme with the question codes, their
//! names and the availability years per country.
//!
//! The codec works on the in-memory [`ProjectWorkbook`]; [`save_project`]
//! and [`load_project`] move it to and from XLSX.
//!
//! # Example
//!
//! ```ignore
//! use survey_project::{ImportOptions, export_project, import_project, load_project, save_project};
//!
//! save_project(&export_project(&session)?, Path::new("project.xlsx"))?;
//!
//! let project = load_project(Path::new("project.xlsx"))?;
//! let summary = import_project(&mut session, &project, &ImportOptions::default());
//! ```

mod codec;
mod error;
mod names;
mod workbook;
mod xlsx;

// === Error Types ===
pub use error::{ProjectError, Result};

// === Naming ===
pub use names::{
    CODE_COLUMN, INFO_COUNTRY_COLUMN, INFO_SHEET, MAX_THEME_SHEET_LEN, NAME_COLUMN,
    sanitize_sheet_name,
};

// === Codec ===
pub use codec::{ImportOptions, ImportSummary, export_project, import_project};
pub use workbook::{ProjectSheet, ProjectWorkbook};

// === XLSX ===
pub use xlsx::{load_project, save_project};
