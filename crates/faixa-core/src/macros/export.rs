//! CSV export of the master sheet.

use std::io::Write;

use csv::WriterBuilder;
use tracing::info;

use faixa_model::{Cell, OutputSchema, Table};
use faixa_store::Workbook;

use crate::error::{MacroError, Result};
use crate::macros::require_sheet;
use crate::report::MacroOutcome;

/// Spreadsheet documents are served from here.
pub const EXPORT_URL_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Download link for one sheet of a document as CSV.
pub fn export_url(document_id: &str, sheet_id: u64) -> String {
    format!("{EXPORT_URL_BASE}/{document_id}/export?format=csv&gid={sheet_id}")
}

/// Master sheet contents plus the link that downloads them.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    pub sheet: String,
    pub url: String,
    pub rows: Table,
}

/// Checks that `sheet` exists and holds data below its header, and builds
/// its download link. Opening the link is left to the host.
pub fn prepare_export(workbook: &dyn Workbook, sheet: &str) -> Result<ExportPlan> {
    let info = require_sheet(workbook, sheet)?;
    let rows = workbook.data_range(sheet)?;
    if rows.len() < 2 {
        return Err(MacroError::NoDataRows {
            sheet: sheet.to_string(),
        });
    }
    Ok(ExportPlan {
        sheet: info.name,
        url: export_url(workbook.document_id(), info.id),
        rows,
    })
}

pub fn export_csv(workbook: &dyn Workbook, sheet: &str) -> Result<MacroOutcome> {
    let plan = prepare_export(workbook, sheet)?;
    info!(sheet, url = %plan.url, "export link ready");
    Ok(MacroOutcome::Exported {
        sheet: plan.sheet,
        url: plan.url,
        rows: plan.rows.len() - 1,
    })
}

/// Writes exported rows as delimited text after checking the header carries
/// every column of `schema`.
///
/// Rows are padded to the widest row so every record has the same field
/// count.
pub fn write_export<W: Write>(
    plan: &ExportPlan,
    schema: OutputSchema,
    delimiter: u8,
    writer: W,
) -> Result<usize> {
    let header = plan.rows.first().map(Vec::as_slice).unwrap_or_default();
    let missing = schema.missing_columns(header);
    if !missing.is_empty() {
        return Err(MacroError::IncompleteHeader {
            sheet: plan.sheet.clone(),
            missing,
        });
    }
    let width = plan.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    for row in &plan.rows {
        let mut fields: Vec<String> = row.iter().map(Cell::to_text).collect();
        fields.resize(width, String::new());
        out.write_record(&fields)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(plan.rows.len().saturating_sub(1))
}
