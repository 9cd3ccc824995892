//! Time-band append: staging sheet → master sheet.

use tracing::{debug, info};

use faixa_model::{CellRange, staging};
use faixa_store::Workbook;

use crate::error::{MacroError, Result};
use crate::macros::require_sheet;
use crate::pipeline::{BatchError, build_append_batch};
use crate::report::MacroOutcome;
use crate::settings::MacroSettings;

/// Normalizes the staged time bands, appends them to the master sheet and
/// clears the staging rows.
///
/// The master header is rewritten with the configured schema on success.
/// Every check runs before the first write, so a failure leaves both sheets
/// untouched.
pub fn add_time_bands(workbook: &mut dyn Workbook, settings: &MacroSettings) -> Result<MacroOutcome> {
    let master = settings.sheets.master.as_str();
    let source = settings.sheets.time_bands.as_str();
    require_sheet(workbook, source)?;
    require_sheet(workbook, master)?;

    let required = CellRange::parse_a1(staging::REQUIRED_FIELDS)?;
    let shared = workbook.get_range(source, required)?;
    if shared.iter().flatten().any(faixa_model::Cell::is_blank) {
        return Err(MacroError::MissingRequiredFields {
            sheet: source.to_string(),
            range: required.to_string(),
        });
    }

    let data = workbook.data_range(source)?;
    let header = settings.schema.header_row();
    let batch = build_append_batch(data.get(1..).unwrap_or_default(), &header, workbook.time_zone())
        .map_err(|error| match error {
            BatchError::NoDataRows => MacroError::NoDataRows {
                sheet: source.to_string(),
            },
            BatchError::NoValidRows => MacroError::NoValidRows,
        })?;
    debug!(
        staged = data.len().saturating_sub(1),
        kept = batch.rows.len(),
        skipped = batch.skipped,
        "built time-band batch"
    );

    // A narrower schema must not leave stale header cells to its right.
    let header_width = workbook.last_column(master)?.max(batch.header_to_write.len());
    workbook.clear_range(master, CellRange::new(1, 1, 1, header_width)?)?;
    workbook.set_range(master, 1, 1, std::slice::from_ref(&batch.header_to_write))?;
    let first_row = workbook.last_row(master)? + 1;
    workbook.set_range(master, first_row, 1, &batch.rows)?;

    let staged_width = workbook.last_column(source)?;
    let staged = CellRange::rows(2, data.len(), 1, staged_width)?;
    workbook.clear_range(source, staged)?;

    info!(
        sheet = master,
        first_row,
        rows = batch.rows.len(),
        "appended time bands"
    );
    Ok(MacroOutcome::Appended {
        sheet: master.to_string(),
        first_row,
        rows: batch.rows.len(),
        skipped: batch.skipped,
    })
}
