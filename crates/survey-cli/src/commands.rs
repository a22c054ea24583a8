use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use survey_cli::render::{
    active_themes_plain, import_summary_plain, matrix_json, matrix_plain, matrix_table,
    themes_table,
};
use survey_core::{Session, SurveyData};
use survey_ingest::{load_inputs, locate_inputs};
use survey_project::{ImportOptions, export_project, import_project, load_project, save_project};

use crate::cli::{ExportArgs, InputArgs, MatrixArgs, MatrixFormatArg, ShowArgs};

pub fn run_themes(inputs: &InputArgs) -> Result<()> {
    let data = load_data(inputs)?;
    println!("{}", themes_table(data.available()));
    Ok(())
}

pub fn run_countries(inputs: &InputArgs) -> Result<()> {
    let data = load_data(inputs)?;
    for country in data.countries() {
        println!("{country}");
    }
    Ok(())
}

pub fn run_matrix(inputs: &InputArgs, args: &MatrixArgs) -> Result<()> {
    let data = load_data(inputs)?;
    if !data.available().contains_theme(&args.theme) {
        bail!("unknown theme '{}'", args.theme);
    }
    let mut session = Session::new(data);
    if let Some(project) = &args.project {
        apply_project(&mut session, project, ImportOptions::default())?;
    }
    apply_countries(&mut session, &args.countries)?;

    let matrix = session.preview(&args.theme);
    match args.format {
        MatrixFormatArg::Table => println!("{}", matrix_table(&matrix)),
        MatrixFormatArg::Plain => println!("{}", matrix_plain(&matrix)),
        MatrixFormatArg::Json => {
            println!("{}", matrix_json(&matrix).context("serialize matrix")?);
        }
    }
    Ok(())
}

pub fn run_export(inputs: &InputArgs, args: &ExportArgs) -> Result<()> {
    let data = load_data(inputs)?;
    let span = info_span!("export", output = %args.output.display());
    let _guard = span.enter();

    let mut session = Session::new(data);
    if let Some(project) = &args.project {
        apply_project(&mut session, project, ImportOptions::default())?;
    }
    apply_countries(&mut session, &args.countries)?;

    for theme in &args.select_all {
        warn_unknown_theme(&session, theme);
        session.selection_mut().select_all(theme);
    }
    for theme in &args.clear {
        warn_unknown_theme(&session, theme);
        session.selection_mut().clear(theme);
    }
    for spec in &args.select {
        let (theme, codes) = parse_select(spec)?;
        warn_unknown_theme(&session, theme);
        let kept = session.selection_mut().set_selected(theme, &codes);
        if kept < codes.len() {
            warn!(theme, requested = codes.len(), kept, "some codes have no data in this theme");
        }
    }

    let project = export_project(&session).context("build project workbook")?;
    save_project(&project, &args.output)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(themes = project.sheets.len(), "export complete");
    println!(
        "Wrote {} ({} themes, {} countries)",
        args.output.display(),
        project.sheets.len(),
        project.countries.len()
    );
    Ok(())
}

pub fn run_show(inputs: &InputArgs, args: &ShowArgs) -> Result<()> {
    let data = load_data(inputs)?;
    let mut session = Session::new(data);
    let summary = apply_project(
        &mut session,
        &args.project,
        ImportOptions {
            reset_unlisted: args.exact,
        },
    )?;
    println!("{}", import_summary_plain(&summary, session.countries()));
    let active = session.selection().active_themes();
    if !active.is_empty() {
        println!();
        println!("{}", active_themes_plain(&active));
    }
    Ok(())
}

fn load_data(inputs: &InputArgs) -> Result<Arc<SurveyData>> {
    let files = locate_inputs(
        &inputs.data_dir,
        inputs.data.as_deref(),
        inputs.catalog.as_deref(),
    )
    .context("locate input files")?;
    let loaded = load_inputs(&files).context("load survey inputs")?;
    Ok(Arc::new(SurveyData::new(loaded.catalog, loaded.table)))
}

fn apply_project(
    session: &mut Session,
    path: &Path,
    options: ImportOptions,
) -> Result<survey_project::ImportSummary> {
    let project =
        load_project(path).with_context(|| format!("read project {}", path.display()))?;
    Ok(import_project(session, &project, &options))
}

/// Replaces the session countries when any were given; none of them being
/// known is an error.
fn apply_countries(session: &mut Session, countries: &[String]) -> Result<()> {
    if countries.is_empty() {
        return Ok(());
    }
    let kept = session.set_countries(countries);
    if kept == 0 {
        return Err(anyhow!(
            "none of the given countries is in the survey table: {}",
            countries.join(", ")
        ));
    }
    if kept < countries.len() {
        warn!(requested = countries.len(), kept, "ignored unknown or repeated countries");
    }
    Ok(())
}

fn warn_unknown_theme(session: &Session, theme: &str) {
    if !session.data().available().contains_theme(theme) {
        warn!(theme, "unknown theme ignored");
    }
}

/// Parses `THEME=CODE,CODE`. An empty code list clears the theme.
fn parse_select(spec: &str) -> Result<(&str, Vec<String>)> {
    let (theme, codes) = spec
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("invalid --select '{spec}': expected THEME=CODE,CODE"))?;
    let theme = theme.trim();
    if theme.is_empty() {
        bail!("invalid --select '{spec}': missing theme");
    }
    let codes = codes
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect();
    Ok((theme, codes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_select_specs() {
        let (theme, codes) = parse_select("Trust=A165, E069_01,").unwrap();
        assert_eq!(theme, "Trust");
        assert_eq!(codes, vec!["A165", "E069_01"]);

        let (theme, codes) = parse_select("Religion: beliefs=").unwrap();
        assert_eq!(theme, "Religion: beliefs");
        assert!(codes.is_empty());
    }

    #[test]
    fn rejects_malformed_select_specs() {
        assert!(parse_select("Trust").is_err());
        assert!(parse_select("=A165").is_err());
    }
}
