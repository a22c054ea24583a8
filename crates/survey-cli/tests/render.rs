//! Rendering of CLI output.

use std::collections::BTreeMap;

use survey_cli::render::{
    active_themes_plain, import_summary_plain, matrix_json, matrix_plain, matrix_table,
};
use survey_core::{AvailabilityCell, AvailabilityMatrix, AvailabilityRow};
use survey_project::ImportSummary;

fn cell(country: &str, years: &[&str]) -> AvailabilityCell {
    AvailabilityCell {
        country: country.to_string(),
        years: years.iter().map(|year| (*year).to_string()).collect(),
    }
}

fn matrix() -> AvailabilityMatrix {
    AvailabilityMatrix {
        countries: vec!["Finland".to_string(), "Sweden".to_string()],
        rows: vec![
            AvailabilityRow {
                code: "A165".to_string(),
                name: "Most people can be trusted".to_string(),
                cells: vec![cell("Finland", &["1990", "2017"]), cell("Sweden", &[])],
            },
            AvailabilityRow {
                code: "E069_01".to_string(),
                name: "Confidence: churches".to_string(),
                cells: vec![cell("Finland", &[]), cell("Sweden", &["1999"])],
            },
        ],
    }
}

#[test]
fn plain_matrix_is_tab_separated() {
    insta::assert_snapshot!(matrix_plain(&matrix()), @r"
    Kod	Soru	Finland	Sweden
    A165	Most people can be trusted	1990, 2017	-
    E069_01	Confidence: churches	-	1999
    ");
}

#[test]
fn json_matrix_keeps_year_lists() {
    let json = matrix_json(&matrix()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["countries"], serde_json::json!(["Finland", "Sweden"]));
    assert_eq!(
        value["rows"][0]["cells"][0],
        serde_json::json!({"country": "Finland", "years": ["1990", "2017"]})
    );
    assert_eq!(value["rows"][1]["cells"][0]["years"], serde_json::json!([]));
}

#[test]
fn table_matrix_contains_every_cell() {
    let rendered = matrix_table(&matrix()).to_string();

    assert!(rendered.contains("Most people can be trusted"));
    assert!(rendered.contains("1990, 2017"));
    assert!(rendered.contains("1999"));
}

#[test]
fn active_themes_listing() {
    let mut active = BTreeMap::new();
    active.insert("Trust".to_string(), vec!["A165".to_string(), "E069_01".to_string()]);
    active.insert("Religion".to_string(), vec!["F025".to_string()]);

    insta::assert_snapshot!(active_themes_plain(&active), @r"
    Religion: F025
    Trust: A165, E069_01
    ");
}

#[test]
fn import_summary_reports_skips_and_unchanged_countries() {
    let summary = ImportSummary {
        sheets_seen: 3,
        themes_loaded: 2,
        skipped: vec!["Economy".to_string()],
        countries_applied: false,
    };

    insta::assert_snapshot!(
        import_summary_plain(&summary, &["Croatia".to_string()]),
        @r"
    Loaded 2 of 3 sheets
    Countries (unchanged): Croatia
    Skipped: Economy
    "
    );
}
