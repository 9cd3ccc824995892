//! Service-order append: staged OSO/line pairs → master columns J:K.

use tracing::{debug, info};

use faixa_model::{CellRange, Row, SERVICE_ORDER_COLUMNS, SERVICE_ORDER_FIRST_COLUMN};
use faixa_store::Workbook;

use crate::error::{MacroError, Result};
use crate::identifiers::{next_service_order_row, validate_service_orders};
use crate::macros::require_sheet;
use crate::report::MacroOutcome;
use crate::settings::MacroSettings;

const PAIR_WIDTH: usize = SERVICE_ORDER_COLUMNS.len();

/// Validates staged service-order pairs and appends them below the last
/// pair already on the master sheet, then clears the staging pairs.
///
/// One bad pair rejects the whole batch before anything is written.
pub fn add_service_orders(
    workbook: &mut dyn Workbook,
    settings: &MacroSettings,
) -> Result<MacroOutcome> {
    let master = settings.sheets.master.as_str();
    let source = settings.sheets.service_orders.as_str();
    require_sheet(workbook, source)?;
    require_sheet(workbook, master)?;

    let staged_last = workbook.last_row(source)?;
    if staged_last < 2 {
        return Err(MacroError::NoDataRows {
            sheet: source.to_string(),
        });
    }
    let staged_range = CellRange::rows(2, staged_last, 1, PAIR_WIDTH)?;
    let staged = workbook.get_range(source, staged_range)?;
    let orders = validate_service_orders(&staged, 2)?;

    let master_last = workbook.last_row(master)?;
    let existing = if master_last > 1 {
        let pairs = CellRange::rows(2, master_last, SERVICE_ORDER_FIRST_COLUMN, PAIR_WIDTH)?;
        workbook.get_range(master, pairs)?
    } else {
        Vec::new()
    };
    let first_row = next_service_order_row(&existing);
    debug!(
        staged = staged.len(),
        valid = orders.len(),
        first_row,
        "validated service orders"
    );

    let rows: Vec<Row> = orders.into_iter().map(|order| order.cells).collect();
    workbook.set_range(master, first_row, SERVICE_ORDER_FIRST_COLUMN, &rows)?;
    workbook.clear_range(source, staged_range)?;

    info!(sheet = master, first_row, rows = rows.len(), "appended service orders");
    Ok(MacroOutcome::Appended {
        sheet: master.to_string(),
        first_row,
        rows: rows.len(),
        skipped: staged.len() - rows.len(),
    })
}
