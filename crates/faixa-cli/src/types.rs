use std::path::PathBuf;

use serde::Serialize;

use faixa_cli::blocks::SheetOverview;
use faixa_core::MacroReport;

#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub workbook_dir: PathBuf,
    #[serde(flatten)]
    pub report: MacroReport,
    /// Sheet files rewritten after the macro succeeded.
    pub saved_sheets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_file: Option<ExportFile>,
}

impl ActionResult {
    pub fn has_errors(&self) -> bool {
        !self.report.succeeded()
    }
}

#[derive(Debug, Serialize)]
pub struct ExportFile {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct ShowResult {
    pub workbook_dir: PathBuf,
    pub sheet: String,
    #[serde(flatten)]
    pub overview: SheetOverview,
}
