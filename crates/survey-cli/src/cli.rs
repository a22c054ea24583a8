//! CLI argument definitions for the survey selection tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey",
    version,
    about = "Survey question selection - pick questions per theme and export availability",
    long_about = "Pick survey questions per theme and see in which years each country asked them.\n\n\
                  Selections are saved to and restored from project workbooks (XLSX) holding\n\
                  the selected countries and one availability sheet per theme."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Where the survey table and question catalog are found.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Directory searched for the default input file names.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Survey table (XLSX or CSV); skips the search in --data-dir.
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Question catalog CSV; skips the search in --data-dir.
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List themes with their question counts.
    Themes,

    /// List the countries present in the survey table.
    Countries,

    /// Show the availability matrix of one theme.
    Matrix(MatrixArgs),

    /// Write a project workbook.
    Export(ExportArgs),

    /// Load a project workbook and print what it selects.
    Show(ShowArgs),
}

#[derive(Parser)]
pub struct MatrixArgs {
    /// Theme to preview.
    #[arg(long = "theme", value_name = "THEME")]
    pub theme: String,

    /// Country column (repeatable, kept in the given order).
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Start from the selections stored in a project workbook.
    #[arg(long = "project", value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: MatrixFormatArg,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Destination XLSX file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Start from the selections stored in a project workbook.
    #[arg(long = "project", value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Country column (repeatable, kept in the given order).
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Select every question of a theme (repeatable).
    #[arg(long = "all", value_name = "THEME")]
    pub select_all: Vec<String>,

    /// Deselect every question of a theme (repeatable).
    #[arg(long = "clear", value_name = "THEME")]
    pub clear: Vec<String>,

    /// Replace a theme's selection, e.g. `Trust=A165,E069_01` (repeatable).
    ///
    /// Applied after --all and --clear. Codes without data are dropped.
    #[arg(long = "select", value_name = "THEME=CODES")]
    pub select: Vec<String>,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Project workbook to load.
    #[arg(long = "project", value_name = "PATH")]
    pub project: PathBuf,

    /// Clear themes that have no sheet in the workbook instead of keeping
    /// their default selection.
    #[arg(long = "exact")]
    pub exact: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MatrixFormatArg {
    Table,
    Plain,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
