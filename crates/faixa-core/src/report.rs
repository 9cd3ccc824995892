//! What a macro did, in a form the CLI can print or serialize.

use std::fmt;

use serde::Serialize;

/// The user-triggerable actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MacroKind {
    /// Normalize staged time bands and append them to the master sheet.
    AddTimeBands,
    /// Validate staged service-order pairs and append them.
    AddServiceOrders,
    /// Clear the service-order columns of the master sheet.
    ClearServiceOrders,
    /// Clear the time-band columns of the master sheet.
    ClearTimeBands,
    /// Build the CSV download link of the master sheet.
    ExportCsv,
}

impl MacroKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddTimeBands => "add-bands",
            Self::AddServiceOrders => "add-orders",
            Self::ClearServiceOrders => "clear-orders",
            Self::ClearTimeBands => "clear-bands",
            Self::ExportCsv => "export",
        }
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MacroOutcome {
    /// Rows written starting at `first_row`.
    Appended {
        sheet: String,
        first_row: usize,
        rows: usize,
        skipped: usize,
    },
    Cleared {
        sheet: String,
        range: String,
    },
    /// The user declined the confirmation; nothing was written.
    Cancelled,
    Exported {
        sheet: String,
        url: String,
        rows: usize,
    },
    /// The macro stopped with an error; nothing was written.
    Failed {
        error: String,
    },
}

impl MacroOutcome {
    /// Message shown to the user for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Appended {
                sheet,
                first_row,
                rows,
                ..
            } => format!("{rows} row(s) added to sheet '{sheet}' starting at row {first_row}."),
            Self::Cleared { sheet, range } => format!("Cleared {range} on sheet '{sheet}'."),
            Self::Cancelled => "Operation cancelled.".to_string(),
            Self::Exported { url, .. } => format!("Exporting CSV: {url}"),
            Self::Failed { error } => error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroReport {
    pub action: MacroKind,
    #[serde(flatten)]
    pub outcome: MacroOutcome,
}

impl MacroReport {
    /// True unless the macro failed. A cancelled clear is not a failure.
    pub fn succeeded(&self) -> bool {
        !matches!(self.outcome, MacroOutcome::Failed { .. })
    }
}
