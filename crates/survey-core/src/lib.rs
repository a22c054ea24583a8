//! Selection state and availability matrices for survey question exports.
//!
//! [`SurveyData`] holds the loaded catalog and observation table and is shared
//! read-only across sessions. Each [`Session`] owns its own
//! [`SelectionStore`] and country selection, and previews themes through the
//! [`AvailabilityMatrixBuilder`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use survey_core::{Session, SurveyData};
//!
//! let data = Arc::new(SurveyData::new(catalog, table));
//! let mut session = Session::new(data);
//! session.selection_mut().set_selected("Trust", ["A165", "E069_11"]);
//! let matrix = session.preview("Trust");
//! ```

mod available;
mod matrix;
mod selection;
mod session;

// === Available codes ===
pub use available::AvailableCodes;

// === Availability matrix ===
pub use matrix::{
    AvailabilityCell, AvailabilityMatrix, AvailabilityMatrixBuilder, AvailabilityRow, EMPTY_CELL,
    PRESENCE_MARKER, YEAR_SEPARATOR,
};

// === Selection ===
pub use selection::SelectionStore;

// === Session ===
pub use session::{DEFAULT_COUNTRIES, Session, SurveyData};
