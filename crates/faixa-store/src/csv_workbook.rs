//! A workbook backed by a directory of CSV files, one file per sheet.
//!
//! `CSV.csv`, `ADD_Linhas.csv` and `ADD_OSOs.csv` become sheets named after
//! their file stems. Changes stay in memory until [`CsvWorkbook::save`], which
//! rewrites only the sheets that were touched.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use faixa_model::{Cell, CellRange, Row, Table};

use crate::config::WorkbookConfig;
use crate::error::{Result, StoreError};
use crate::memory::MemoryWorkbook;
use crate::workbook::{SheetInfo, Workbook};

#[derive(Debug)]
pub struct CsvWorkbook {
    dir: PathBuf,
    config: WorkbookConfig,
    inner: MemoryWorkbook,
    dirty: BTreeSet<String>,
}

impl CsvWorkbook {
    /// Opens `dir`, reading `workbook.toml` when present.
    pub fn open(dir: &Path) -> Result<Self> {
        let config = WorkbookConfig::load(dir)?;
        Self::open_with_config(dir, config)
    }

    pub fn open_with_config(dir: &Path, config: WorkbookConfig) -> Result<Self> {
        if !dir.is_dir() {
            return Err(StoreError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        let mut inner = MemoryWorkbook::new(config.document_id.clone(), config.tz()?);
        for (position, path) in list_sheet_files(dir)?.into_iter().enumerate() {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let cells = read_sheet(&path, config.delimiter)?;
            let id = config
                .sheet_ids
                .get(name)
                .copied()
                .unwrap_or(position as u64);
            debug!(sheet = name, rows = cells.len(), id, "loaded sheet");
            inner.add_sheet_with_id(name, id, cells)?;
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            config,
            inner,
            dirty: BTreeSet::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &WorkbookConfig {
        &self.config
    }

    /// Adds a new sheet, written out on the next save.
    pub fn add_sheet(&mut self, name: &str, cells: Table) -> Result<SheetInfo> {
        let id = self.config.sheet_ids.get(name).copied();
        let info = match id {
            Some(id) => self.inner.add_sheet_with_id(name, id, cells)?,
            None => self.inner.add_sheet(name, cells)?,
        };
        self.dirty.insert(name.to_string());
        Ok(info)
    }

    /// Sheets changed since opening or the last save.
    pub fn dirty_sheets(&self) -> impl Iterator<Item = &str> {
        self.dirty.iter().map(String::as_str)
    }

    /// Writes every touched sheet back to its file.
    ///
    /// Each file is written to a sibling temporary file first and renamed
    /// into place.
    pub fn save(&mut self) -> Result<usize> {
        let pending: Vec<String> = self.dirty.iter().cloned().collect();
        for name in &pending {
            let table = self.inner.snapshot(name)?;
            let path = self.sheet_path(name);
            write_sheet(&path, &table, self.config.delimiter)?;
            info!(sheet = %name, rows = table.len(), path = %path.display(), "saved sheet");
            self.dirty.remove(name);
        }
        Ok(pending.len())
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }
}

impl Workbook for CsvWorkbook {
    fn document_id(&self) -> &str {
        self.inner.document_id()
    }

    fn time_zone(&self) -> Tz {
        self.inner.time_zone()
    }

    fn sheet(&self, name: &str) -> Option<SheetInfo> {
        self.inner.sheet(name)
    }

    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn last_row(&self, sheet: &str) -> Result<usize> {
        self.inner.last_row(sheet)
    }

    fn last_column(&self, sheet: &str) -> Result<usize> {
        self.inner.last_column(sheet)
    }

    fn get_range(&self, sheet: &str, range: CellRange) -> Result<Table> {
        self.inner.get_range(sheet, range)
    }

    fn set_range(&mut self, sheet: &str, row: usize, column: usize, rows: &[Row]) -> Result<()> {
        self.inner.set_range(sheet, row, column, rows)?;
        self.dirty.insert(sheet.to_string());
        Ok(())
    }

    fn clear_range(&mut self, sheet: &str, range: CellRange) -> Result<()> {
        self.inner.clear_range(sheet, range)?;
        self.dirty.insert(sheet.to_string());
        Ok(())
    }
}

/// CSV files directly inside `dir`, sorted by file name.
fn list_sheet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| StoreError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_sheet(path: &Path, delimiter: char) -> Result<Table> {
    let csv_error = |source: csv::Error| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter_byte(delimiter))
        .from_path(path)
        .map_err(csv_error)?;
    let mut table: Table = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let first_row = table.is_empty();
        let row: Row = record
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                if first_row && index == 0 {
                    parse_cell(raw.trim_start_matches('\u{feff}'))
                } else {
                    parse_cell(raw)
                }
            })
            .collect();
        table.push(row);
    }
    Ok(table)
}

fn write_sheet(path: &Path, table: &Table, delimiter: char) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    let csv_error = |source: csv::Error| StoreError::Csv {
        path: tmp.clone(),
        source,
    };
    let width = table.iter().map(Vec::len).max().unwrap_or(0);
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter_byte(delimiter))
        .from_path(&tmp)
        .map_err(csv_error)?;
    for row in table {
        let mut fields: Vec<String> = row.iter().map(Cell::to_text).collect();
        fields.resize(width, String::new());
        writer.write_record(&fields).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| StoreError::Write {
        path: tmp.clone(),
        source,
    })?;
    drop(writer);
    fs::rename(&tmp, path).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one raw CSV field into a cell.
///
/// Blank fields are empty cells and RFC 3339 timestamps are date/time cells.
/// Everything else stays text, so leading zeros such as `0800` survive.
pub fn parse_cell(raw: &str) -> Cell {
    if raw.is_empty() {
        return Cell::Empty;
    }
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(when) => Cell::DateTime(when.with_timezone(&Utc)),
        Err(_) => Cell::text(raw),
    }
}

pub(crate) fn delimiter_byte(delimiter: char) -> u8 {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .unwrap_or(b',')
}
