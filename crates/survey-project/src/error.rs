//! Error types for project workbook export and import.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use survey_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    /// Export was requested with every theme selection empty.
    #[error("no theme has selected questions; nothing to export")]
    NoActiveThemes,

    /// Failed to build or save the XLSX file.
    #[error("failed to write project workbook {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// Failed to open or read a project workbook.
    #[error(transparent)]
    Read(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, ProjectError>;
