//! Input file discovery.
//!
//! Each input is matched against an ordered list of candidate file names in a
//! data directory; the first one that exists wins.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Candidate names for the main survey workbook, in priority order.
pub const DATA_CANDIDATES: &[&str] = &[
    "Country_Questions_Table v02..xlsx",
    "Country_Questions_Table.xlsx",
];

/// Candidate names for the question catalog, in priority order.
pub const CATALOG_CANDIDATES: &[&str] = &[
    "questions.csv",
    "normalized_evsvws_catalog_THEMED_UNIFIED.xlsx - questions.csv",
];

/// Which input a lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Respondent-level survey table.
    Data,
    /// Question code / name / theme catalog.
    Catalog,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => f.write_str("survey data file"),
            Self::Catalog => f.write_str("question catalog"),
        }
    }
}

/// Resolved input file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub data: PathBuf,
    pub catalog: PathBuf,
}

/// Returns the first candidate that exists in `dir`.
pub fn locate_input(dir: &Path, candidates: &[&str], kind: InputKind) -> Result<PathBuf> {
    let found = candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file());

    match found {
        Some(path) => {
            tracing::debug!(%kind, path = %path.display(), "located input file");
            Ok(path)
        }
        None => Err(IngestError::MissingInputFile {
            kind,
            dir: dir.to_path_buf(),
            candidates: candidates.iter().map(|name| (*name).to_string()).collect(),
        }),
    }
}

/// Resolves both inputs, preferring explicit paths over candidate probing.
pub fn locate_inputs(
    dir: &Path,
    data: Option<&Path>,
    catalog: Option<&Path>,
) -> Result<InputFiles> {
    let data = match data {
        Some(path) => require_file(path)?,
        None => locate_input(dir, DATA_CANDIDATES, InputKind::Data)?,
    };
    let catalog = match catalog {
        Some(path) => require_file(path)?,
        None => locate_input(dir, CATALOG_CANDIDATES, InputKind::Catalog)?,
    };
    Ok(InputFiles { data, catalog })
}

fn require_file(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
