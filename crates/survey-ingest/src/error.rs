//! Error types for survey input loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::discovery::InputKind;

/// Errors that can occur while locating or loading survey inputs.
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// None of the candidate file names exist.
    #[error("{kind} not found in {dir} (tried: {})", .candidates.join(", "))]
    MissingInputFile {
        kind: InputKind,
        dir: PathBuf,
        candidates: Vec<String>,
    },

    /// Explicitly provided file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not one of the supported table formats.
    #[error("unsupported file type: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a spreadsheet workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// No sheet name contains the expected pattern.
    #[error("no sheet containing '{pattern}' in {path}")]
    MissingSheet { path: PathBuf, pattern: String },

    /// A sheet has no header row.
    #[error("sheet '{sheet}' in {path} is empty")]
    EmptySheet { path: PathBuf, sheet: String },

    /// Required column not found.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Table Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Loaded columns do not form a valid observation table.
    #[error("invalid survey table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: survey_model::ModelError,
    },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
