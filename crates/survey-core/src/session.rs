//! Loaded survey data and per-user session state.

use std::collections::HashSet;
use std::sync::Arc;

use survey_model::{Catalog, ObservationTable};

use crate::available::AvailableCodes;
use crate::matrix::{AvailabilityMatrix, AvailabilityMatrixBuilder};
use crate::selection::SelectionStore;

/// Countries selected when nothing else is chosen.
pub const DEFAULT_COUNTRIES: &[&str] = &["Bulgaria", "Croatia", "Finland", "Sweden"];

/// Read-only inputs shared by every session.
#[derive(Debug)]
pub struct SurveyData {
    catalog: Catalog,
    table: ObservationTable,
    available: Arc<AvailableCodes>,
    countries: Vec<String>,
}

impl SurveyData {
    pub fn new(catalog: Catalog, table: ObservationTable) -> Self {
        let available = Arc::new(AvailableCodes::from_sources(&catalog, &table));
        let countries = table.countries();
        Self {
            catalog,
            table,
            available,
            countries,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn table(&self) -> &ObservationTable {
        &self.table
    }

    pub fn available(&self) -> &AvailableCodes {
        &self.available
    }

    /// Known countries, sorted.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn is_known_country(&self, country: &str) -> bool {
        self.countries
            .binary_search_by(|known| known.as_str().cmp(country))
            .is_ok()
    }

    pub fn matrix_builder(&self) -> AvailabilityMatrixBuilder<'_> {
        AvailabilityMatrixBuilder::new(&self.catalog, &self.table)
    }
}

/// One user's mutable state over shared [`SurveyData`].
#[derive(Debug, Clone)]
pub struct Session {
    data: Arc<SurveyData>,
    selection: SelectionStore,
    countries: Vec<String>,
}

impl Session {
    /// Starts a session with untouched selections and the default countries
    /// that the table knows about.
    pub fn new(data: Arc<SurveyData>) -> Self {
        let selection = SelectionStore::new(Arc::clone(&data.available));
        let mut session = Self {
            data,
            selection,
            countries: Vec::new(),
        };
        session.set_countries(DEFAULT_COUNTRIES);
        session
    }

    pub fn data(&self) -> &SurveyData {
        &self.data
    }

    pub fn shared_data(&self) -> Arc<SurveyData> {
        Arc::clone(&self.data)
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionStore {
        &mut self.selection
    }

    /// Selected countries in the order they were chosen.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Replaces the country selection with the known, distinct entries of
    /// `countries`, keeping their order. Returns the number kept.
    pub fn set_countries<I, S>(&mut self, countries: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut unknown = 0usize;
        for country in countries {
            let country = country.as_ref();
            if !self.data.is_known_country(country) {
                unknown += 1;
                continue;
            }
            if seen.insert(country.to_string()) {
                kept.push(country.to_string());
            }
        }
        if unknown > 0 {
            tracing::debug!(unknown, "ignored unknown countries");
        }
        self.countries = kept;
        self.countries.len()
    }

    /// Availability matrix of the theme's current selection over the
    /// selected countries.
    pub fn preview(&mut self, theme: &str) -> AvailabilityMatrix {
        let codes = self.selection.ordered(theme);
        self.data.matrix_builder().build(&codes, &self.countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::{CountryYearSource, QuestionMeta};

    fn data() -> Arc<SurveyData> {
        let catalog = Catalog::from_entries(vec![
            QuestionMeta::new("Q1", "First", "Trust"),
            QuestionMeta::new("Q2", "Second", "Trust"),
        ]);
        let mut table = ObservationTable::from_columns(vec![
            (
                "S021".to_string(),
                vec!["Sweden [2017]".to_string(), "Finland [1990]".to_string()],
            ),
            ("Q1".to_string(), vec!["VAR".to_string(), "VAR".to_string()]),
        ])
        .unwrap();
        table
            .assign_country_year(CountryYearSource::Combined("S021"))
            .unwrap();
        Arc::new(SurveyData::new(catalog, table))
    }

    #[test]
    fn defaults_are_filtered_to_known_countries() {
        let session = Session::new(data());
        assert_eq!(session.countries(), ["Finland", "Sweden"]);
    }

    #[test]
    fn set_countries_keeps_order_and_drops_unknown() {
        let mut session = Session::new(data());
        let kept = session.set_countries(["Sweden", "Norway", "Finland", "Sweden"]);
        assert_eq!(kept, 2);
        assert_eq!(session.countries(), ["Sweden", "Finland"]);
    }

    #[test]
    fn preview_uses_selection_and_countries() {
        let mut session = Session::new(data());
        session.set_countries(["Sweden"]);

        let matrix = session.preview("Trust");

        assert_eq!(matrix.countries, vec!["Sweden"]);
        assert_eq!(matrix.rows.len(), 1);
        assert_eq!(matrix.rows[0].code, "Q1");
        assert_eq!(matrix.rows[0].cells[0].render(), "2017");
    }

    #[test]
    fn sessions_share_data_but_not_selection() {
        let data = data();
        let mut first = Session::new(Arc::clone(&data));
        let mut second = Session::new(data);

        first.selection_mut().clear("Trust");

        assert!(first.selection_mut().get("Trust").is_empty());
        assert_eq!(second.selection_mut().ordered("Trust"), vec!["Q1"]);
    }
}
