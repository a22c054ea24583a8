//! Country-by-year availability matrix.
//!
//! For every requested question code and country the builder collects the
//! distinct years in which at least one record of that country carries the
//! presence marker in the question's column. Years are opaque strings and
//! sort lexically.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;
use survey_model::{Catalog, Observation, ObservationTable};

/// Cell value meaning "question was administered".
pub const PRESENCE_MARKER: &str = "VAR";

/// Rendered value of a cell without years.
pub const EMPTY_CELL: &str = "-";

pub const YEAR_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityCell {
    pub country: String,
    /// Strictly ascending, no duplicates.
    pub years: Vec<String>,
}

impl AvailabilityCell {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Joined year list, or [`EMPTY_CELL`] when there are no years.
    pub fn render(&self) -> String {
        if self.years.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            self.years.join(YEAR_SEPARATOR)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityRow {
    pub code: String,
    pub name: String,
    /// One cell per matrix country, in matrix column order.
    pub cells: Vec<AvailabilityCell>,
}

impl AvailabilityRow {
    pub fn cell(&self, country: &str) -> Option<&AvailabilityCell> {
        self.cells.iter().find(|cell| cell.country == country)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailabilityMatrix {
    pub countries: Vec<String>,
    pub rows: Vec<AvailabilityRow>,
}

impl AvailabilityMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, code: &str) -> Option<&AvailabilityRow> {
        self.rows.iter().find(|row| row.code == code)
    }
}

/// Builds availability matrices over a loaded catalog and table.
///
/// `build` is a pure function of its inputs: it never mutates the table and
/// returns the same matrix for the same codes and countries.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityMatrixBuilder<'a> {
    catalog: &'a Catalog,
    table: &'a ObservationTable,
}

impl<'a> AvailabilityMatrixBuilder<'a> {
    pub fn new(catalog: &'a Catalog, table: &'a ObservationTable) -> Self {
        Self { catalog, table }
    }

    /// One row per code (in the given order), one cell per distinct country
    /// (first occurrence order).
    ///
    /// Codes without a table column and countries without records produce
    /// empty cells.
    pub fn build<C, K>(&self, codes: &[C], countries: &[K]) -> AvailabilityMatrix
    where
        C: AsRef<str>,
        K: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let countries: Vec<&str> = countries
            .iter()
            .map(AsRef::as_ref)
            .filter(|country| seen.insert(*country))
            .collect();

        let records_by_country = self.restrict(&countries);

        let rows = codes
            .iter()
            .map(|code| self.build_row(code.as_ref(), &countries, &records_by_country))
            .collect::<Vec<_>>();

        tracing::debug!(
            codes = rows.len(),
            countries = countries.len(),
            matched_rows = records_by_country.values().map(Vec::len).sum::<usize>(),
            "built availability matrix"
        );

        AvailabilityMatrix {
            countries: countries.iter().map(|country| (*country).to_string()).collect(),
            rows,
        }
    }

    /// Records of the requested countries, collected in a single pass.
    fn restrict(&self, countries: &[&str]) -> HashMap<&'a str, Vec<Observation<'a>>> {
        let wanted: HashSet<&str> = countries.iter().copied().collect();
        let mut records: HashMap<&'a str, Vec<Observation<'a>>> = HashMap::new();
        for observation in self.table.observations() {
            let Some(country) = observation.country() else {
                continue;
            };
            if wanted.contains(country) {
                records.entry(country).or_default().push(observation);
            }
        }
        records
    }

    fn build_row(
        &self,
        code: &str,
        countries: &[&str],
        records_by_country: &HashMap<&'a str, Vec<Observation<'a>>>,
    ) -> AvailabilityRow {
        let column = self.table.column(code);
        if column.is_none() {
            tracing::debug!(code, "question has no data column");
        }

        let cells = countries
            .iter()
            .map(|country| {
                let years = match (column, records_by_country.get(country)) {
                    (Some(values), Some(records)) => years_present(values, records),
                    _ => Vec::new(),
                };
                AvailabilityCell {
                    country: (*country).to_string(),
                    years,
                }
            })
            .collect();

        AvailabilityRow {
            code: code.to_string(),
            name: self
                .catalog
                .display_name(code)
                .unwrap_or(EMPTY_CELL)
                .to_string(),
            cells,
        }
    }

}

fn years_present(values: &[String], records: &[Observation<'_>]) -> Vec<String> {
    records
        .iter()
        .filter(|record| values[record.row()] == PRESENCE_MARKER)
        .filter_map(Observation::year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::{CountryYearSource, QuestionMeta};

    fn fixture() -> (Catalog, ObservationTable) {
        let catalog = Catalog::from_entries(vec![
            QuestionMeta::new("Q1", "Trust in people", "Trust"),
            QuestionMeta::new("Q2", "Trust in parliament", "Trust"),
        ]);
        let mut table = ObservationTable::from_columns(vec![
            (
                "S021".to_string(),
                vec![
                    "Finland [1990]".to_string(),
                    "Finland [1990]".to_string(),
                    "Finland [1981]".to_string(),
                    "Sweden [2008]".to_string(),
                    "Sweden [1999]".to_string(),
                    "unknown".to_string(),
                ],
            ),
            (
                "Q1".to_string(),
                vec![
                    "VAR".to_string(),
                    "VAR".to_string(),
                    "NA".to_string(),
                    "VAR".to_string(),
                    "VAR".to_string(),
                    "VAR".to_string(),
                ],
            ),
        ])
        .unwrap();
        table
            .assign_country_year(CountryYearSource::Combined("S021"))
            .unwrap();
        (catalog, table)
    }

    #[test]
    fn duplicate_years_collapse_and_non_markers_are_ignored() {
        let (catalog, table) = fixture();
        let matrix = AvailabilityMatrixBuilder::new(&catalog, &table).build(&["Q1"], &["Finland"]);

        let row = matrix.row("Q1").unwrap();
        assert_eq!(row.name, "Trust in people");
        assert_eq!(row.cell("Finland").unwrap().render(), "1990");
    }

    #[test]
    fn years_are_sorted_and_joined() {
        let (catalog, table) = fixture();
        let matrix = AvailabilityMatrixBuilder::new(&catalog, &table).build(&["Q1"], &["Sweden"]);

        let cell = matrix.rows[0].cell("Sweden").unwrap();
        assert_eq!(cell.years, vec!["1999", "2008"]);
        assert_eq!(cell.render(), "1999, 2008");
    }

    #[test]
    fn unknown_country_renders_sentinel() {
        let (catalog, table) = fixture();
        let matrix = AvailabilityMatrixBuilder::new(&catalog, &table).build(&["Q1"], &["Norway"]);

        let cell = matrix.rows[0].cell("Norway").unwrap();
        assert!(cell.is_empty());
        assert_eq!(cell.render(), EMPTY_CELL);
    }

    #[test]
    fn missing_column_and_name_degrade_to_empty() {
        let (catalog, table) = fixture();
        let matrix =
            AvailabilityMatrixBuilder::new(&catalog, &table).build(&["Q2", "X9"], &["Finland"]);

        assert_eq!(matrix.rows[0].cell("Finland").unwrap().render(), "-");
        assert_eq!(matrix.rows[1].name, "-");
    }

    #[test]
    fn serializes_years_as_lists() {
        let (catalog, table) = fixture();
        let matrix = AvailabilityMatrixBuilder::new(&catalog, &table).build(&["Q1"], &["Sweden"]);

        let value = serde_json::to_value(&matrix).unwrap();

        assert_eq!(value["countries"], serde_json::json!(["Sweden"]));
        assert_eq!(value["rows"][0]["code"], "Q1");
        assert_eq!(
            value["rows"][0]["cells"][0]["years"],
            serde_json::json!(["1999", "2008"])
        );
    }

    #[test]
    fn countries_are_deduplicated_in_order() {
        let (catalog, table) = fixture();
        let matrix = AvailabilityMatrixBuilder::new(&catalog, &table)
            .build(&["Q1"], &["Sweden", "Finland", "Sweden"]);

        assert_eq!(matrix.countries, vec!["Sweden", "Finland"]);
        assert_eq!(matrix.rows[0].cells.len(), 2);
    }
}
