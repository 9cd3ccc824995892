//! Confirmation-gated column clears on the master sheet.
//!
//! Split in two so the decision and the effect can be exercised on their
//! own: [`plan_clear`] works out what would be cleared, the caller asks for
//! confirmation, and [`execute_clear`] does it.

use serde::Serialize;
use tracing::info;

use faixa_model::{CellRange, SERVICE_ORDER_COLUMNS, SERVICE_ORDER_FIRST_COLUMN, TIME_BAND_COLUMNS};
use faixa_store::Workbook;

use crate::error::{MacroError, Result};
use crate::interaction::Interaction;
use crate::macros::require_sheet;
use crate::report::MacroOutcome;

/// Column group a clear applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClearTarget {
    /// `Oso` and `LinhaOso` (J:K).
    ServiceOrders,
    /// Band times and the columns that travel with them (A:I).
    TimeBands,
}

impl ClearTarget {
    /// First column (1-based) and width.
    pub const fn columns(self) -> (usize, usize) {
        match self {
            Self::ServiceOrders => (SERVICE_ORDER_FIRST_COLUMN, SERVICE_ORDER_COLUMNS.len()),
            Self::TimeBands => (1, TIME_BAND_COLUMNS.len()),
        }
    }

    pub const fn question(self) -> &'static str {
        match self {
            Self::ServiceOrders => "Clear all service orders (Oso, LinhaOso)?",
            Self::TimeBands => "Clear all time bands and their details?",
        }
    }
}

/// A clear that has passed its checks and is waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearPlan {
    pub target: ClearTarget,
    pub sheet: String,
    pub range: CellRange,
}

/// Works out the range to clear: every data row below the header, limited
/// to the target columns.
pub fn plan_clear(workbook: &dyn Workbook, sheet: &str, target: ClearTarget) -> Result<ClearPlan> {
    require_sheet(workbook, sheet)?;
    let last_row = workbook.last_row(sheet)?;
    if last_row < 2 {
        return Err(MacroError::NoDataRows {
            sheet: sheet.to_string(),
        });
    }
    let (column, width) = target.columns();
    Ok(ClearPlan {
        target,
        sheet: sheet.to_string(),
        range: CellRange::rows(2, last_row, column, width)?,
    })
}

/// Asks the user to confirm `plan`.
pub fn request_confirmation(ui: &mut dyn Interaction, plan: &ClearPlan) -> bool {
    ui.confirm("Confirmation", plan.target.question())
}

pub fn execute_clear(workbook: &mut dyn Workbook, plan: &ClearPlan) -> Result<MacroOutcome> {
    workbook.clear_range(&plan.sheet, plan.range)?;
    info!(sheet = %plan.sheet, range = %plan.range, "cleared columns");
    Ok(MacroOutcome::Cleared {
        sheet: plan.sheet.clone(),
        range: plan.range.to_string(),
    })
}

/// Plans, confirms and performs a clear. A declined confirmation writes
/// nothing and reports [`MacroOutcome::Cancelled`].
pub fn clear_columns(
    workbook: &mut dyn Workbook,
    ui: &mut dyn Interaction,
    sheet: &str,
    target: ClearTarget,
) -> Result<MacroOutcome> {
    let plan = plan_clear(workbook, sheet, target)?;
    if !request_confirmation(ui, &plan) {
        info!(sheet, ?target, "clear cancelled");
        return Ok(MacroOutcome::Cancelled);
    }
    execute_clear(workbook, &plan)
}
