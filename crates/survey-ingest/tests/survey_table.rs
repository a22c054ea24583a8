//! Tests for survey table loading from CSV and XLSX.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use survey_ingest::{IngestError, load_inputs, load_survey_table, locate_inputs};
use tempfile::TempDir;

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

fn write_workbook(path: &Path, sheets: Vec<(&str, Vec<Vec<&str>>)>) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name).expect("sheet name");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                sheet
                    .write_string(row_idx as u32, col_idx as u16, *value)
                    .expect("write cell");
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

#[test]
fn csv_table_derives_country_and_year() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "survey.csv",
        "S021,A165,F063\n\
         Finland [1990],VAR,\n\
         Finland [1990],VAR,VAR\n\
         Sweden [1981],,VAR\n\
         Unknown,VAR,VAR\n",
    );

    let table = load_survey_table(&path).expect("load csv");

    assert_eq!(table.height(), 4);
    assert!(table.has_column("A165"));
    assert_eq!(table.country(0), Some("Finland"));
    assert_eq!(table.year(2), Some("1981"));
    assert_eq!(table.country(3), None);
    assert_eq!(table.column("A165").unwrap()[1], "VAR");
    assert_eq!(table.column("A165").unwrap()[2], "");
    assert_eq!(table.countries(), vec!["Finland", "Sweden"]);
}

#[test]
fn csv_years_stay_text() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "survey.csv",
        "Country_Name,Year,A165\nNorway,2008,VAR\nNorway,n/a,VAR\n",
    );

    let table = load_survey_table(&path).expect("load csv");

    assert_eq!(table.year(0), Some("2008"));
    assert_eq!(table.year(1), Some("n/a"));
}

#[test]
fn workbook_table_uses_survey_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Country_Questions_Table.xlsx");
    write_workbook(
        &path,
        vec![
            ("Notes", vec![vec!["ignored"]]),
            (
                "EVS_WVS_Survey",
                vec![
                    vec!["S021", "A165"],
                    vec!["Croatia [1999]", "VAR"],
                    vec!["Croatia [2008]", ""],
                ],
            ),
        ],
    );

    let table = load_survey_table(&path).expect("load workbook");

    assert_eq!(table.height(), 2);
    assert_eq!(table.column_names(), &["S021".to_string(), "A165".to_string()]);
    assert_eq!(table.country(1), Some("Croatia"));
    assert_eq!(table.year(1), Some("2008"));
}

#[test]
fn workbook_blank_headers_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.xlsx");
    write_workbook(
        &path,
        vec![(
            "Survey",
            vec![
                vec!["S021", "", "Q1", "", "Q2"],
                vec!["Finland [1990]", "x", "VAR", "y", "VAR"],
            ],
        )],
    );

    let table = load_survey_table(&path).expect("load workbook");

    assert_eq!(
        table.column_names(),
        &["S021", "Unnamed: 1", "Q1", "Unnamed: 3", "Q2"].map(str::to_string)
    );
    assert_eq!(table.column("Q2").unwrap()[0], "VAR");
    assert_eq!(table.country(0), Some("Finland"));
}

#[test]
fn workbook_without_survey_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.xlsx");
    write_workbook(
        &path,
        vec![("Sheet1", vec![vec!["S021"], vec!["Finland [1990]"]])],
    );

    let err = load_survey_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::MissingSheet { .. }));
}

#[test]
fn table_without_country_field_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "survey.csv", "A165\nVAR\n");

    let err = load_survey_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "S021"));
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "survey.txt", "S021\n");

    let err = load_survey_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn loads_both_inputs_from_candidate_names() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "questions.csv",
        "question_code,question_name,theme\nA165,Most people can be trusted,Trust\n",
    );
    write_workbook(
        &dir.path().join("Country_Questions_Table.xlsx"),
        vec![(
            "Survey",
            vec![vec!["S021", "A165"], vec!["Finland [1990]", "VAR"]],
        )],
    );

    let files = locate_inputs(dir.path(), None, None).expect("locate inputs");
    let inputs = load_inputs(&files).expect("load inputs");

    assert_eq!(inputs.catalog.len(), 1);
    assert_eq!(inputs.table.countries(), vec!["Finland"]);
}
