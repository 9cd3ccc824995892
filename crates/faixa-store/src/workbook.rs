//! The tabular store seen by the macros.

use chrono_tz::Tz;

use faixa_model::{CellRange, Row, Table};

use crate::error::Result;

/// Identity of one sheet inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub name: String,
    /// Numeric sheet id (`gid` in export URLs).
    pub id: u64,
}

/// A spreadsheet document: named sheets of cells addressed by 1-based ranges.
///
/// Reads are bounded rectangles; writes replace or clear bounded rectangles.
/// There is no transactional isolation: every call applies immediately.
pub trait Workbook {
    /// Identifier of the document, used to build export URLs.
    fn document_id(&self) -> &str;

    /// Time zone the document renders date/time values in.
    fn time_zone(&self) -> Tz;

    fn sheet(&self, name: &str) -> Option<SheetInfo>;

    fn sheet_names(&self) -> Vec<String>;

    /// Last row holding any non-blank cell, 0 for an empty sheet.
    fn last_row(&self, sheet: &str) -> Result<usize>;

    /// Last column holding any non-blank cell, 0 for an empty sheet.
    fn last_column(&self, sheet: &str) -> Result<usize>;

    /// Reads `range`; cells outside the stored area read as empty.
    fn get_range(&self, sheet: &str, range: CellRange) -> Result<Table>;

    /// Writes `rows` with their top-left corner at (`row`, `column`).
    fn set_range(&mut self, sheet: &str, row: usize, column: usize, rows: &[Row]) -> Result<()>;

    /// Blanks every cell in `range`.
    fn clear_range(&mut self, sheet: &str, range: CellRange) -> Result<()>;

    /// Reads everything from `A1` to the last non-blank row and column.
    fn data_range(&self, sheet: &str) -> Result<Table> {
        let height = self.last_row(sheet)?;
        let width = self.last_column(sheet)?;
        if height == 0 || width == 0 {
            return Ok(Vec::new());
        }
        self.get_range(sheet, CellRange::new(1, 1, height, width)?)
    }
}
