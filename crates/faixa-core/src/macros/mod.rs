//! The sheet macros and the runner that reports their outcome.

pub mod clear;
pub mod export;
pub mod service_orders;
pub mod time_bands;

use tracing::{info, info_span, warn};

use faixa_store::{SheetInfo, Workbook};

use crate::error::{MacroError, Result};
use crate::interaction::Interaction;
use crate::report::{MacroKind, MacroOutcome, MacroReport};
use crate::settings::MacroSettings;

pub use clear::{
    ClearPlan, ClearTarget, clear_columns, execute_clear, plan_clear, request_confirmation,
};
pub use export::{EXPORT_URL_BASE, ExportPlan, export_csv, export_url, prepare_export, write_export};
pub use service_orders::add_service_orders;
pub use time_bands::add_time_bands;

pub(crate) fn require_sheet(workbook: &dyn Workbook, name: &str) -> Result<SheetInfo> {
    workbook.sheet(name).ok_or_else(|| MacroError::MissingSheet {
        name: name.to_string(),
    })
}

/// Runs one macro and reports back through `ui`.
///
/// Errors never escape: they become a single alert and a
/// [`MacroOutcome::Failed`] report.
pub fn run_macro(
    kind: MacroKind,
    workbook: &mut dyn Workbook,
    ui: &mut dyn Interaction,
    settings: &MacroSettings,
) -> MacroReport {
    let span = info_span!("macro", name = kind.label());
    let _guard = span.enter();

    let master = settings.sheets.master.as_str();
    let result = match kind {
        MacroKind::AddTimeBands => add_time_bands(workbook, settings),
        MacroKind::AddServiceOrders => add_service_orders(workbook, settings),
        MacroKind::ClearServiceOrders => {
            clear_columns(workbook, ui, master, ClearTarget::ServiceOrders)
        }
        MacroKind::ClearTimeBands => clear_columns(workbook, ui, master, ClearTarget::TimeBands),
        MacroKind::ExportCsv => export_csv(workbook, master),
    };
    let outcome = result.unwrap_or_else(|error| {
        warn!(%error, "macro failed");
        MacroOutcome::Failed {
            error: error.to_string(),
        }
    });
    info!(succeeded = !matches!(outcome, MacroOutcome::Failed { .. }), "macro finished");
    ui.alert(&outcome.message());
    MacroReport {
        action: kind,
        outcome,
    }
}
