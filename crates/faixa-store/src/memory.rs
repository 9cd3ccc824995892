//! In-memory workbook.

use chrono_tz::Tz;
use tracing::trace;

use faixa_model::{Cell, CellRange, Row, Table};

use crate::error::{Result, StoreError};
use crate::workbook::{SheetInfo, Workbook};

#[derive(Debug, Clone)]
struct Sheet {
    name: String,
    id: u64,
    cells: Table,
}

impl Sheet {
    fn last_row(&self) -> usize {
        self.cells
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_blank()))
            .map_or(0, |index| index + 1)
    }

    fn last_column(&self) -> usize {
        self.cells
            .iter()
            .filter_map(|row| row.iter().rposition(|cell| !cell.is_blank()))
            .max()
            .map_or(0, |index| index + 1)
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        if self.cells.len() < row {
            self.cells.resize_with(row, Vec::new);
        }
        let cells = &mut self.cells[row - 1];
        if cells.len() < column {
            cells.resize(column, Cell::Empty);
        }
        &mut cells[column - 1]
    }
}

/// A workbook held entirely in memory.
///
/// Counts every write so callers can assert that a failed action touched
/// nothing.
#[derive(Debug, Clone)]
pub struct MemoryWorkbook {
    document_id: String,
    time_zone: Tz,
    sheets: Vec<Sheet>,
    writes: usize,
}

impl MemoryWorkbook {
    pub fn new(document_id: impl Into<String>, time_zone: Tz) -> Self {
        Self {
            document_id: document_id.into(),
            time_zone,
            sheets: Vec::new(),
            writes: 0,
        }
    }

    /// Adds a sheet with the next free id.
    pub fn add_sheet(&mut self, name: impl Into<String>, cells: Table) -> Result<SheetInfo> {
        let id = self.sheets.iter().map(|s| s.id + 1).max().unwrap_or(0);
        self.add_sheet_with_id(name, id, cells)
    }

    pub fn add_sheet_with_id(
        &mut self,
        name: impl Into<String>,
        id: u64,
        cells: Table,
    ) -> Result<SheetInfo> {
        let name = name.into();
        if self.sheets.iter().any(|s| s.name == name) {
            return Err(StoreError::DuplicateSheet { name });
        }
        self.sheets.push(Sheet {
            name: name.clone(),
            id,
            cells,
        });
        Ok(SheetInfo { name, id })
    }

    /// Builder form of [`add_sheet`](Self::add_sheet).
    ///
    /// # Panics
    ///
    /// Panics if a sheet with the same name was already added.
    #[must_use]
    pub fn with_sheet(mut self, name: &str, cells: Table) -> Self {
        if let Err(error) = self.add_sheet(name, cells) {
            panic!("{error}");
        }
        self
    }

    /// Number of `set_range`/`clear_range` calls applied so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Stored cells of a sheet, trimmed to its data range.
    pub fn snapshot(&self, name: &str) -> Result<Table> {
        self.data_range(name)
    }

    fn find(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::SheetNotFound {
                name: name.to_string(),
            })
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::SheetNotFound {
                name: name.to_string(),
            })
    }
}

impl Workbook for MemoryWorkbook {
    fn document_id(&self) -> &str {
        &self.document_id
    }

    fn time_zone(&self) -> Tz {
        self.time_zone
    }

    fn sheet(&self, name: &str) -> Option<SheetInfo> {
        self.find(name).ok().map(|s| SheetInfo {
            name: s.name.clone(),
            id: s.id,
        })
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn last_row(&self, sheet: &str) -> Result<usize> {
        Ok(self.find(sheet)?.last_row())
    }

    fn last_column(&self, sheet: &str) -> Result<usize> {
        Ok(self.find(sheet)?.last_column())
    }

    fn get_range(&self, sheet: &str, range: CellRange) -> Result<Table> {
        let stored = self.find(sheet)?;
        let table = (range.row()..range.row() + range.height())
            .map(|row| {
                let source = stored.cells.get(row - 1);
                (range.column()..range.column() + range.width())
                    .map(|column| {
                        source
                            .and_then(|cells| cells.get(column - 1))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        Ok(table)
    }

    fn set_range(&mut self, sheet: &str, row: usize, column: usize, rows: &[Row]) -> Result<()> {
        let range = CellRange::new(row, column, rows.len(), rows.first().map_or(0, Vec::len))?;
        if let Some((offset, bad)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != range.width())
        {
            return Err(StoreError::RaggedRows {
                sheet: sheet.to_string(),
                row: row + offset,
                expected: range.width(),
                found: bad.len(),
            });
        }
        let target = self.find_mut(sheet)?;
        for (r, cells) in rows.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                *target.cell_mut(row + r, column + c) = cell.clone();
            }
        }
        self.writes += 1;
        trace!(sheet, range = %range, "set range");
        Ok(())
    }

    fn clear_range(&mut self, sheet: &str, range: CellRange) -> Result<()> {
        let target = self.find_mut(sheet)?;
        for row in range.row()..range.row() + range.height() {
            let Some(cells) = target.cells.get_mut(row - 1) else {
                break;
            };
            for column in range.column()..range.column() + range.width() {
                if let Some(cell) = cells.get_mut(column - 1) {
                    *cell = Cell::Empty;
                }
            }
        }
        self.writes += 1;
        trace!(sheet, range = %range, "cleared range");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faixa_model::row;

    fn workbook() -> MemoryWorkbook {
        MemoryWorkbook::new("doc", Tz::UTC).with_sheet(
            "CSV",
            vec![row(["A", "B", "C"]), row(["1", "", ""]), row(["", "", ""])],
        )
    }

    #[test]
    fn last_row_and_column_ignore_blank_cells() {
        let wb = workbook();
        assert_eq!(wb.last_row("CSV").unwrap(), 2);
        assert_eq!(wb.last_column("CSV").unwrap(), 3);
    }

    #[test]
    fn get_range_pads_outside_stored_area() {
        let wb = workbook();
        let range = CellRange::new(2, 1, 3, 4).unwrap();
        let table = wb.get_range("CSV", range).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|r| r.len() == 4));
        assert_eq!(table[0][0], Cell::text("1"));
        assert_eq!(table[2][3], Cell::Empty);
    }

    #[test]
    fn set_range_grows_the_sheet() {
        let mut wb = workbook();
        wb.set_range("CSV", 5, 10, &[row(["123456", "1234"])]).unwrap();
        assert_eq!(wb.last_row("CSV").unwrap(), 5);
        assert_eq!(wb.last_column("CSV").unwrap(), 11);
        assert_eq!(wb.write_count(), 1);
    }

    #[test]
    fn set_range_rejects_ragged_rows() {
        let mut wb = workbook();
        let err = wb
            .set_range("CSV", 2, 1, &[row(["a", "b"]), row(["c"])])
            .unwrap_err();
        assert!(matches!(err, StoreError::RaggedRows { row: 3, .. }));
        assert_eq!(wb.write_count(), 0);
    }

    #[test]
    fn clear_range_blanks_cells() {
        let mut wb = workbook();
        wb.clear_range("CSV", CellRange::new(2, 1, 5, 3).unwrap()).unwrap();
        assert_eq!(wb.last_row("CSV").unwrap(), 1);
    }

    #[test]
    fn unknown_sheet_is_an_error() {
        let wb = workbook();
        assert!(wb.sheet("ADD").is_none());
        assert!(matches!(
            wb.last_row("ADD"),
            Err(StoreError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn sheet_ids_are_sequential() {
        let mut wb = workbook();
        let info = wb.add_sheet("ADD_OSOs", Vec::new()).unwrap();
        assert_eq!(info.id, 1);
        assert!(matches!(
            wb.add_sheet("CSV", Vec::new()),
            Err(StoreError::DuplicateSheet { .. })
        ));
    }
}
