//! Data model shared by the faixa crates: cells, ranges and sheet layouts.

pub mod cell;
pub mod error;
pub mod range;
pub mod schema;

pub use cell::{Cell, Row, Table, cell_at, format_number, row};
pub use error::{ModelError, Result};
pub use range::{CellRange, column_index, column_letters};
pub use schema::{
    OutputSchema, SERVICE_ORDER_COLUMNS, SERVICE_ORDER_FIRST_COLUMN, TIME_BAND_COLUMNS, staging,
};
