//! Sheet macros for staging, validating and relocating schedule rows.
//!
//! - [`pipeline`]: time-band rows → normalized master rows
//! - [`identifiers`]: service-order pair validation and placement
//! - [`macros`]: the user-triggered actions over a [`Workbook`](faixa_store::Workbook)
//! - [`interaction`]: alerts and confirmations

pub mod error;
pub mod identifiers;
pub mod interaction;
pub mod macros;
pub mod pipeline;
pub mod report;
pub mod settings;

pub use error::{IdentifierField, MacroError, Result};
pub use identifiers::{ServiceOrder, next_service_order_row, validate_service_orders};
pub use interaction::{Interaction, ScriptedInteraction};
pub use macros::{
    ClearPlan, ClearTarget, EXPORT_URL_BASE, ExportPlan, add_service_orders, add_time_bands,
    clear_columns, execute_clear, export_csv, export_url, plan_clear, prepare_export,
    request_confirmation, run_macro, write_export,
};
pub use pipeline::{AppendBatch, BatchError, build_append_batch};
pub use report::{MacroKind, MacroOutcome, MacroReport};
pub use settings::MacroSettings;
