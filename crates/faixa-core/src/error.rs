//! Errors surfaced to the person who triggered a macro.

use std::fmt;

use faixa_model::ModelError;
use faixa_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Which half of a service-order pair failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IdentifierField {
    /// Operational service order number (`Oso`).
    ServiceOrder,
    /// Line the service order belongs to (`LinhaOso`).
    Line,
}

impl IdentifierField {
    pub const fn column(self) -> &'static str {
        match self {
            Self::ServiceOrder => "Oso",
            Self::Line => "LinhaOso",
        }
    }

    pub const fn expected(self) -> &'static str {
        match self {
            Self::ServiceOrder => "6 digits",
            Self::Line => "4 or 6 digits",
        }
    }
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Every way a macro can stop. None of them leave partial writes behind.
#[derive(Debug, Error)]
pub enum MacroError {
    #[error("sheet '{name}' not found")]
    MissingSheet { name: String },

    #[error("missing band details: {range} on sheet '{sheet}' must be filled in")]
    MissingRequiredFields { sheet: String, range: String },

    #[error("no data rows found below the header of sheet '{sheet}'")]
    NoDataRows { sheet: String },

    #[error("no valid rows found to add")]
    NoValidRows,

    #[error("invalid {field} on row {row}: \"{value}\" (expected {})", .field.expected())]
    InvalidIdentifierFormat {
        row: usize,
        field: IdentifierField,
        value: String,
    },

    #[error("sheet '{sheet}' header is missing columns: {}", .missing.join(", "))]
    IncompleteHeader {
        sheet: String,
        missing: Vec<&'static str>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Range(#[from] ModelError),

    #[error("failed to write export: {0}")]
    Export(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MacroError>;
