//! Fixed sheet layouts: staging column positions and the master header.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Row};
use crate::error::ModelError;

/// Column positions (0-based) on the time-band staging sheet.
pub mod staging {
    pub const BAND_START: usize = 0;
    pub const BAND_END: usize = 1;
    /// Interval, travel time, terminal time and fleet are copied verbatim.
    pub const PASSTHROUGH: std::ops::Range<usize> = 2..6;
    pub const LINE: usize = 7;
    pub const DAY: usize = 8;
    pub const DIRECTION: usize = 9;
    /// Cells of the first data row that must be filled in (`H2:J2`).
    pub const REQUIRED_FIELDS: &str = "H2:J2";
}

/// Time-band columns of the master sheet, in order.
pub const TIME_BAND_COLUMNS: [&str; 9] = [
    "FaixaInicio",
    "FaixaFinal",
    "Intervalo",
    "Percurso",
    "TempTerm",
    "Frota",
    "Linha",
    "Dia",
    "Sentido",
];

/// Service-order columns of the master sheet, in order.
pub const SERVICE_ORDER_COLUMNS: [&str; 2] = ["Oso", "LinhaOso"];

/// 1-based master sheet column holding the service order (`J`).
pub const SERVICE_ORDER_FIRST_COLUMN: usize = TIME_BAND_COLUMNS.len() + 1;

/// Header layout written to the master sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSchema {
    /// Time bands followed by the service-order pair.
    #[default]
    Full,
    /// Time bands only, for master sheets without service-order columns.
    Legacy,
}

impl OutputSchema {
    pub fn columns(self) -> Vec<&'static str> {
        let mut columns = TIME_BAND_COLUMNS.to_vec();
        if self == Self::Full {
            columns.extend(SERVICE_ORDER_COLUMNS);
        }
        columns
    }

    pub fn width(self) -> usize {
        match self {
            Self::Full => TIME_BAND_COLUMNS.len() + SERVICE_ORDER_COLUMNS.len(),
            Self::Legacy => TIME_BAND_COLUMNS.len(),
        }
    }

    pub fn header_row(self) -> Row {
        self.columns().into_iter().map(Cell::from).collect()
    }

    /// Required columns missing from `header`, compared after trimming.
    pub fn missing_columns(self, header: &[Cell]) -> Vec<&'static str> {
        self.columns()
            .into_iter()
            .filter(|name| !header.iter().any(|cell| cell.to_text().trim() == *name))
            .collect()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for OutputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputSchema {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "legacy" => Ok(Self::Legacy),
            other => Err(ModelError::UnknownSchema(other.to_string())),
        }
    }
}
