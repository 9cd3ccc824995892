//! Rectangular cell ranges addressed the way sheets address them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A 1-based rectangular range: origin plus height and width.
///
/// A range with zero height or width is valid and selects nothing. The
/// origin is never 0, including for deserialized ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeParts")]
pub struct CellRange {
    row: usize,
    column: usize,
    height: usize,
    width: usize,
}

#[derive(Deserialize)]
struct RangeParts {
    row: usize,
    column: usize,
    height: usize,
    width: usize,
}

impl TryFrom<RangeParts> for CellRange {
    type Error = ModelError;

    fn try_from(parts: RangeParts) -> Result<Self> {
        Self::new(parts.row, parts.column, parts.height, parts.width)
    }
}

impl CellRange {
    pub fn new(row: usize, column: usize, height: usize, width: usize) -> Result<Self> {
        if row == 0 || column == 0 {
            return Err(ModelError::ZeroOrigin { row, column });
        }
        Ok(Self {
            row,
            column,
            height,
            width,
        })
    }

    /// Rows `first..=last` across `width` columns starting at `column`.
    ///
    /// Yields an empty range when `last < first`.
    pub fn rows(first: usize, last: usize, column: usize, width: usize) -> Result<Self> {
        Self::new(first, column, (last + 1).saturating_sub(first), width)
    }

    /// Parses `A1` or `A1:C3` notation.
    pub fn parse_a1(input: &str) -> Result<Self> {
        let invalid = || ModelError::InvalidRange(input.to_string());
        let (start, end) = match input.trim().split_once(':') {
            Some((start, end)) => (start, end),
            None => (input.trim(), input.trim()),
        };
        let (row_a, col_a) = parse_a1_cell(start).ok_or_else(invalid)?;
        let (row_b, col_b) = parse_a1_cell(end).ok_or_else(invalid)?;
        let (top, bottom) = (row_a.min(row_b), row_a.max(row_b));
        let (left, right) = (col_a.min(col_b), col_a.max(col_b));
        Self::new(top, left, bottom - top + 1, right - left + 1)
    }

    /// First row (1-based).
    pub const fn row(&self) -> usize {
        self.row
    }

    /// First column (1-based).
    pub const fn column(&self) -> usize {
        self.column
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Last row covered, or `row - 1` for an empty range.
    pub fn last_row(&self) -> usize {
        self.row + self.height - 1
    }

    pub fn last_column(&self) -> usize {
        self.column + self.width - 1
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{}{}:<empty>", column_letters(self.column), self.row);
        }
        write!(
            f,
            "{}{}:{}{}",
            column_letters(self.column),
            self.row,
            column_letters(self.last_column()),
            self.last_row()
        )
    }
}

impl FromStr for CellRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_a1(s)
    }
}

/// Column letters for a 1-based column index (1 → `A`, 27 → `AA`).
pub fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// 1-based column index for column letters (case-insensitive).
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0usize, |acc, ch| {
        ch.is_ascii_alphabetic()
            .then(|| acc * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1))
    })
}

fn parse_a1_cell(cell: &str) -> Option<(usize, usize)> {
    let split = cell.find(|ch: char| ch.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(split);
    let column = column_index(letters)?;
    let row: usize = digits.parse().ok()?;
    (row > 0).then_some((row, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_cell_range() {
        let range = CellRange::parse_a1("H2:J2").unwrap();
        assert_eq!(range, CellRange::new(2, 8, 1, 3).unwrap());
        assert_eq!(range.to_string(), "H2:J2");
    }

    #[test]
    fn parses_single_cell_and_reversed_corners() {
        assert_eq!(
            CellRange::parse_a1("b3").unwrap(),
            CellRange::new(3, 2, 1, 1).unwrap()
        );
        assert_eq!(
            CellRange::parse_a1("K9:J2").unwrap(),
            CellRange::new(2, 10, 8, 2).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(CellRange::parse_a1("").is_err());
        assert!(CellRange::parse_a1("A0").is_err());
        assert!(CellRange::parse_a1("12").is_err());
        assert!(CellRange::parse_a1("A1:").is_err());
    }

    #[test]
    fn rows_helper_handles_empty_span() {
        let range = CellRange::rows(2, 1, 1, 9).unwrap();
        assert!(range.is_empty());
        let range = CellRange::rows(2, 5, 10, 2).unwrap();
        assert_eq!(range.to_string(), "J2:K5");
    }

    #[test]
    fn deserializing_rejects_zero_origin() {
        let parsed: std::result::Result<CellRange, _> =
            serde_json::from_str(r#"{"row":0,"column":1,"height":1,"width":1}"#);
        assert!(parsed.is_err());

        let range: CellRange =
            serde_json::from_str(r#"{"row":2,"column":10,"height":3,"width":2}"#).unwrap();
        assert_eq!(range.to_string(), "J2:K4");
        assert_eq!((range.row(), range.column()), (2, 10));
    }

    #[test]
    fn column_letters_round_trip_known_points() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(11), "K");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_index("AA"), Some(27));
        assert_eq!(column_index("k"), Some(11));
        assert_eq!(column_index("A1"), None);
    }
}
