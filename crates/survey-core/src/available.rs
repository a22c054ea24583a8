//! Per-theme universe of selectable question codes.

use std::collections::{BTreeMap, HashSet};

use survey_model::{Catalog, ObservationTable};

#[derive(Debug, Clone, Default)]
struct ThemeCodes {
    ordered: Vec<String>,
    lookup: HashSet<String>,
    catalog_total: usize,
}

/// Codes that are both listed under a theme in the catalog and present as a
/// column in the observation table.
///
/// Computed once at startup; unknown themes have no valid codes.
#[derive(Debug, Clone, Default)]
pub struct AvailableCodes {
    themes: BTreeMap<String, ThemeCodes>,
}

impl AvailableCodes {
    pub fn from_sources(catalog: &Catalog, table: &ObservationTable) -> Self {
        let themes: BTreeMap<String, ThemeCodes> = catalog
            .themes()
            .into_iter()
            .map(|theme| {
                let mut codes = ThemeCodes::default();
                for code in catalog.codes_for_theme(&theme) {
                    codes.catalog_total += 1;
                    if table.has_column(code) {
                        codes.lookup.insert(code.to_string());
                        codes.ordered.push(code.to_string());
                    }
                }
                (theme, codes)
            })
            .collect();

        let available = Self { themes };
        tracing::debug!(
            themes = available.themes.len(),
            with_data = available.themes().filter(|t| available.has_data(t)).count(),
            "computed available codes"
        );
        available
    }

    /// All catalog themes, sorted, including those without data columns.
    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn contains_theme(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    /// Valid codes of `theme` in catalog order; empty for unknown themes.
    pub fn valid_codes(&self, theme: &str) -> &[String] {
        self.themes
            .get(theme)
            .map(|codes| codes.ordered.as_slice())
            .unwrap_or_default()
    }

    pub fn is_valid(&self, theme: &str, code: &str) -> bool {
        self.themes
            .get(theme)
            .is_some_and(|codes| codes.lookup.contains(code))
    }

    pub fn has_data(&self, theme: &str) -> bool {
        !self.valid_codes(theme).is_empty()
    }

    /// Number of catalog codes under `theme`, with or without data.
    pub fn catalog_count(&self, theme: &str) -> usize {
        self.themes
            .get(theme)
            .map_or(0, |codes| codes.catalog_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::QuestionMeta;

    #[test]
    fn restricts_catalog_codes_to_table_columns() {
        let catalog = Catalog::from_entries(vec![
            QuestionMeta::new("Q1", "First", "Trust"),
            QuestionMeta::new("Q2", "Second", "Trust"),
            QuestionMeta::new("Q3", "Third", "Religion"),
            QuestionMeta::new("Q4", "Fourth", "Trust"),
        ]);
        let table = ObservationTable::from_columns(vec![
            ("Q4".to_string(), vec![]),
            ("Q1".to_string(), vec![]),
        ])
        .unwrap();

        let available = AvailableCodes::from_sources(&catalog, &table);

        assert_eq!(available.themes().collect::<Vec<_>>(), vec!["Religion", "Trust"]);
        assert_eq!(available.valid_codes("Trust"), &["Q1", "Q4"]);
        assert!(available.valid_codes("Religion").is_empty());
        assert!(!available.has_data("Religion"));
        assert_eq!(available.catalog_count("Trust"), 3);
        assert!(available.is_valid("Trust", "Q4"));
        assert!(!available.is_valid("Trust", "Q2"));
        assert!(!available.is_valid("Unknown", "Q1"));
        assert!(available.valid_codes("Unknown").is_empty());
    }
}
