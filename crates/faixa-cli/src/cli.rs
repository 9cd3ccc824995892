//! CLI argument definitions for the schedule sheet macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "faixa",
    version,
    about = "Stage, validate and relocate bus schedule rows in a sheet workbook",
    long_about = "Run the schedule sheet macros against a workbook directory.\n\n\
                  Each CSV file in the directory is one sheet. Time bands are staged in\n\
                  ADD_Linhas, service orders in ADD_OSOs, and both land in the CSV sheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow cell values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize staged time bands and append them to the master sheet.
    AddBands(WorkbookArgs),

    /// Validate staged service orders and append them to the master sheet.
    AddOrders(WorkbookArgs),

    /// Clear the service-order columns (J:K) of the master sheet.
    ClearOrders(ClearArgs),

    /// Clear the time-band columns (A:I) of the master sheet.
    ClearBands(ClearArgs),

    /// Print the CSV download link of the master sheet, optionally writing
    /// the sheet to a local file.
    Export(ExportArgs),

    /// Show the master sheet grouped by line, day and direction.
    Show(WorkbookArgs),
}

#[derive(Args, Clone)]
pub struct WorkbookArgs {
    /// Directory holding one CSV file per sheet (and optionally workbook.toml).
    #[arg(value_name = "WORKBOOK_DIR")]
    pub workbook_dir: PathBuf,

    /// IANA time zone used to read time cells (overrides workbook.toml).
    #[arg(long = "time-zone", value_name = "ZONE")]
    pub time_zone: Option<String>,

    /// Spreadsheet document id used in export links (overrides workbook.toml).
    #[arg(long = "document-id", value_name = "ID")]
    pub document_id: Option<String>,

    /// Print the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ClearArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Answer yes to the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

#[derive(Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub workbook: WorkbookArgs,

    /// Also write the master sheet to this file.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Field delimiter of the written file.
    #[arg(long = "delimiter", default_value_t = ';')]
    pub delimiter: char,
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
