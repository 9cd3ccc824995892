//! Spreadsheet cell values.
//!
//! A sheet hands back a mix of text, numbers and date/time values. [`Cell`]
//! tags each shape explicitly so normalizers dispatch with `match` instead
//! of probing runtime types.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single cell value as read from a sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Blank cell.
    #[default]
    Empty,
    /// Free text, kept exactly as entered.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Date or time value (a spreadsheet stores time-of-day as a date too).
    DateTime(DateTime<Utc>),
}

/// An ordered sequence of cells. Meaning is positional.
pub type Row = Vec<Cell>;

/// An ordered sequence of rows. Row 0 is conventionally the header.
pub type Table = Vec<Row>;

static EMPTY: Cell = Cell::Empty;

/// Returns the cell at `index`, or an empty cell when the row is short.
pub fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY)
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for a blank cell or empty text.
    ///
    /// Whitespace-only text is not blank; sheets treat it as content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Number(_) | Self::DateTime(_) => false,
        }
    }

    /// Truthiness as the spreadsheet scripting host sees it.
    ///
    /// Blank cells, empty text, zero and NaN are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(text) => !text.is_empty(),
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::DateTime(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Renders the cell as text.
    ///
    /// Integral numbers drop the fractional part (`800.0` renders as `800`).
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(value) => format_number(*value),
            Self::DateTime(value) => value.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Formats a number the way a sheet displays it in plain text.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<DateTime<Utc>> for Cell {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Builds a row from anything convertible into cells.
pub fn row<I, C>(cells: I) -> Row
where
    I: IntoIterator<Item = C>,
    C: Into<Cell>,
{
    cells.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn truthiness_follows_sheet_rules() {
        assert!(!Cell::Empty.is_truthy());
        assert!(!Cell::text("").is_truthy());
        assert!(Cell::text(" ").is_truthy());
        assert!(Cell::text("0").is_truthy());
        assert!(!Cell::Number(0.0).is_truthy());
        assert!(!Cell::Number(f64::NAN).is_truthy());
        assert!(Cell::Number(5.0).is_truthy());
        let when = Utc.with_ymd_and_hms(1899, 12, 30, 8, 0, 0).unwrap();
        assert!(Cell::DateTime(when).is_truthy());
    }

    #[test]
    fn blank_only_for_empty_content() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::text("").is_blank());
        assert!(!Cell::text(" ").is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(Cell::Number(800.0).to_text(), "800");
        assert_eq!(Cell::Number(8.5).to_text(), "8.5");
        assert_eq!(Cell::Number(-3.0).to_text(), "-3");
    }

    #[test]
    fn cell_at_pads_short_rows() {
        let cells = row(["a"]);
        assert_eq!(cell_at(&cells, 0), &Cell::text("a"));
        assert_eq!(cell_at(&cells, 9), &Cell::Empty);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&Cell::text("0800")).expect("serialize cell");
        assert_eq!(json, r#"{"kind":"text","value":"0800"}"#);
        let back: Cell = serde_json::from_str(&json).expect("deserialize cell");
        assert_eq!(back, Cell::text("0800"));
    }
}
