//! Tabular store used by the faixa macros.
//!
//! [`Workbook`] is the seam between the macros and whatever holds the cells.
//! [`MemoryWorkbook`] keeps everything in memory; [`CsvWorkbook`] loads a
//! directory of CSV files and writes touched sheets back on save.

pub mod config;
pub mod csv_workbook;
pub mod error;
pub mod memory;
pub mod workbook;

pub use config::{
    CONFIG_FILE_NAME, DEFAULT_TIME_ZONE, SheetNames, WorkbookConfig, parse_time_zone,
};
pub use csv_workbook::{CsvWorkbook, parse_cell};
pub use error::{Result, StoreError};
pub use memory::MemoryWorkbook;
pub use workbook::{SheetInfo, Workbook};
