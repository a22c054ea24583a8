//! Respondent-level survey table.
//!
//! Values are stored column-major as raw strings: every question code is one
//! column, and each row additionally carries an optional derived country and
//! year. Rows whose country/year could not be derived keep both unset and are
//! left out of any country/year keyed aggregation.

use std::collections::{BTreeSet, HashMap};

use crate::country_year::parse_country_year;
use crate::error::{ModelError, Result};

/// Where the per-row country and year come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryYearSource<'a> {
    /// Already-split columns; blank cells leave the field unset.
    Columns { country: &'a str, year: &'a str },
    /// A single `"<country> [<year>]"` column.
    Combined(&'a str),
}

/// Read-only view of one respondent record.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    table: &'a ObservationTable,
    row: usize,
}

impl<'a> Observation<'a> {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn country(&self) -> Option<&'a str> {
        self.table.country(self.row)
    }

    pub fn year(&self) -> Option<&'a str> {
        self.table.year(self.row)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<Vec<String>>,
    countries: Vec<Option<String>>,
    years: Vec<Option<String>>,
    height: usize,
}

impl ObservationTable {
    /// Builds a table from named columns of equal length.
    ///
    /// Country and year start out unset for every row; call
    /// [`Self::assign_country_year`] afterwards.
    pub fn from_columns<I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut table = Self::default();
        for (position, (name, values)) in columns.into_iter().enumerate() {
            if position == 0 {
                table.height = values.len();
            } else if values.len() != table.height {
                return Err(ModelError::ColumnLength {
                    column: name,
                    expected: table.height,
                    found: values.len(),
                });
            }
            if table.index.contains_key(&name) {
                return Err(ModelError::DuplicateColumn { column: name });
            }
            table.index.insert(name.clone(), table.names.len());
            table.names.push(name);
            table.values.push(values);
        }
        table.countries = vec![None; table.height];
        table.years = vec![None; table.height];
        Ok(table)
    }

    /// Fills the derived country/year of every row.
    ///
    /// Returns the number of rows left without a country/year. Malformed rows
    /// never fail the call; only a missing source column does.
    pub fn assign_country_year(&mut self, source: CountryYearSource<'_>) -> Result<usize> {
        let mut countries = Vec::with_capacity(self.height);
        let mut years = Vec::with_capacity(self.height);
        match source {
            CountryYearSource::Columns { country, year } => {
                let country_values = self.required_column(country)?;
                let year_values = self.required_column(year)?;
                for (country, year) in country_values.iter().zip(year_values) {
                    countries.push(non_blank(country));
                    years.push(non_blank(year));
                }
            }
            CountryYearSource::Combined(column) => {
                for raw in self.required_column(column)? {
                    match parse_country_year(raw) {
                        Some(parsed) => {
                            countries.push(Some(parsed.country));
                            years.push(Some(parsed.year));
                        }
                        None => {
                            countries.push(None);
                            years.push(None);
                        }
                    }
                }
            }
        }
        let unassigned = countries.iter().filter(|country| country.is_none()).count();
        self.countries = countries;
        self.years = years;
        Ok(unassigned)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|&idx| self.values[idx].as_slice())
    }

    pub fn country(&self, row: usize) -> Option<&str> {
        self.countries.get(row).and_then(Option::as_deref)
    }

    pub fn year(&self, row: usize) -> Option<&str> {
        self.years.get(row).and_then(Option::as_deref)
    }

    pub fn observations(&self) -> impl Iterator<Item = Observation<'_>> {
        (0..self.height).map(move |row| Observation { table: self, row })
    }

    /// Distinct derived countries, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.countries
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn required_column(&self, name: &str) -> Result<&[String]> {
        self.column(name).ok_or_else(|| ModelError::MissingColumn {
            column: name.to_string(),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
