//! Session <-> project workbook conversion.

use std::collections::{BTreeSet, HashMap};

use survey_core::{AvailabilityCell, Session};

use crate::error::{ProjectError, Result};
use crate::names::{CODE_COLUMN, INFO_SHEET, NAME_COLUMN, SheetNamer, sanitize_sheet_name};
use crate::workbook::{ProjectSheet, ProjectWorkbook};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Clear every theme that has no sheet in the workbook.
    pub reset_unlisted: bool,
}

/// Outcome of [`import_project`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Theme sheets in the workbook (the info sheet excluded).
    pub sheets_seen: usize,
    /// Sheets applied to a theme selection.
    pub themes_loaded: usize,
    /// Names of sheets that matched no theme or had no code column.
    pub skipped: Vec<String>,
    /// Whether the country selection was replaced.
    pub countries_applied: bool,
}

/// Snapshot of the session as a project workbook.
///
/// Every active theme becomes one sheet (sorted by theme) holding the
/// materialized availability matrix of its selection over the session
/// countries. Sheet names are sanitized theme names; when two themes collide
/// the later one gets a `~N` suffix.
pub fn export_project(session: &Session) -> Result<ProjectWorkbook> {
    let active = session.selection().active_themes();
    if active.is_empty() {
        return Err(ProjectError::NoActiveThemes);
    }

    let countries = session.countries().to_vec();
    let builder = session.data().matrix_builder();
    let mut namer = SheetNamer::default();
    namer.reserve(INFO_SHEET);

    let mut sheets = Vec::with_capacity(active.len());
    for (theme, codes) in &active {
        let sanitized = sanitize_sheet_name(theme);
        let name = namer.unique(&sanitized);
        if name != sanitized {
            tracing::warn!(
                theme = %theme,
                sheet = %name,
                "sheet name already used by another theme; this sheet will not round-trip"
            );
        }

        let matrix = builder.build(codes, &countries);
        let mut headers = vec![CODE_COLUMN.to_string(), NAME_COLUMN.to_string()];
        headers.extend(matrix.countries.iter().cloned());
        let rows = matrix
            .rows
            .iter()
            .map(|row| {
                let mut values = Vec::with_capacity(headers.len());
                values.push(row.code.clone());
                values.push(row.name.clone());
                values.extend(row.cells.iter().map(AvailabilityCell::render));
                values
            })
            .collect();

        sheets.push(ProjectSheet {
            name,
            headers,
            rows,
        });
    }

    tracing::info!(
        themes = sheets.len(),
        countries = countries.len(),
        "exported project"
    );
    Ok(ProjectWorkbook { countries, sheets })
}

/// Applies a project workbook to the session.
///
/// Countries are filtered to those the survey table knows and replace the
/// current selection only if any remain. Each sheet is matched to a theme by
/// sanitized name, then by exact name; the theme's selection is replaced by
/// the sheet's codes. Sheets matching no theme are skipped.
pub fn import_project(
    session: &mut Session,
    workbook: &ProjectWorkbook,
    options: &ImportOptions,
) -> ImportSummary {
    let mut summary = ImportSummary {
        sheets_seen: workbook.sheets.len(),
        ..ImportSummary::default()
    };

    let known: Vec<&str> = workbook
        .countries
        .iter()
        .map(String::as_str)
        .filter(|country| session.data().is_known_country(country))
        .collect();
    if known.is_empty() {
        if !workbook.countries.is_empty() {
            tracing::warn!(
                listed = workbook.countries.len(),
                "no listed country is known; keeping current countries"
            );
        }
    } else {
        session.set_countries(known);
        summary.countries_applied = true;
    }

    let data = session.shared_data();
    let available = data.available();
    let mut by_sheet_name: HashMap<String, &str> = HashMap::new();
    for theme in available.themes() {
        by_sheet_name
            .entry(sanitize_sheet_name(theme))
            .or_insert(theme);
    }

    let mut loaded: BTreeSet<&str> = BTreeSet::new();
    for sheet in &workbook.sheets {
        if sheet.name == INFO_SHEET {
            continue;
        }
        let theme = by_sheet_name
            .get(&sheet.name)
            .copied()
            .or_else(|| {
                available
                    .contains_theme(&sheet.name)
                    .then_some(sheet.name.as_str())
            });
        let Some(theme) = theme else {
            tracing::warn!(sheet = %sheet.name, "sheet matches no theme; skipped");
            summary.skipped.push(sheet.name.clone());
            continue;
        };
        let Some(codes) = sheet.codes() else {
            tracing::warn!(sheet = %sheet.name, column = CODE_COLUMN, "sheet has no code column; skipped");
            summary.skipped.push(sheet.name.clone());
            continue;
        };

        let kept = session.selection_mut().set_selected(theme, &codes);
        tracing::debug!(theme, sheet = %sheet.name, listed = codes.len(), kept, "loaded theme selection");
        loaded.insert(theme);
        summary.themes_loaded += 1;
    }

    if options.reset_unlisted {
        for theme in available.themes() {
            if !loaded.contains(theme) {
                session.selection_mut().clear(theme);
            }
        }
    }

    tracing::info!(
        sheets = summary.sheets_seen,
        loaded = summary.themes_loaded,
        skipped = summary.skipped.len(),
        countries_applied = summary.countries_applied,
        "imported project"
    );
    summary
}
