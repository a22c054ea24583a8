//! Core data types for survey question availability.
//!
//! - [`Catalog`]: question code to display name and theme, loaded once.
//! - [`ObservationTable`]: one row per respondent record, one column per
//!   question code, plus the derived country and year of each row.
//!
//! Both are read-only after loading.

pub mod catalog;
pub mod country_year;
pub mod error;
pub mod observation;

pub use catalog::{Catalog, QuestionMeta};
pub use country_year::{CountryYear, parse_country_year};
pub use error::{ModelError, Result};
pub use observation::{CountryYearSource, Observation, ObservationTable};
