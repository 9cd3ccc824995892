//! Row pipeline for the time-band append.
//!
//! Takes the staging rows below their header and produces the rows to
//! append to the master sheet. The whole batch shares one line, day and
//! direction, all read from the first staging row.

use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

use faixa_model::{Cell, Row, cell_at, staging};
use faixa_normalize::{normalize_direction, normalize_time};

/// Why a staging batch produced nothing to append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("staging area has no data rows")]
    NoDataRows,
    #[error("no staging row has both band start and end filled in")]
    NoValidRows,
}

/// Rows ready to append plus the header the destination must carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppendBatch {
    pub header_to_write: Row,
    pub rows: Vec<Row>,
    /// Staging rows dropped for lacking a band start or end.
    pub skipped: usize,
}

/// Values copied from the first staging row into every emitted row.
#[derive(Debug, Clone, PartialEq)]
struct BroadcastFields {
    line: Cell,
    day: Cell,
    direction: Cell,
}

impl BroadcastFields {
    fn from_first_row(row: &[Cell]) -> Self {
        Self {
            line: cell_at(row, staging::LINE).clone(),
            day: cell_at(row, staging::DAY).clone(),
            direction: normalize_direction(cell_at(row, staging::DIRECTION)),
        }
    }
}

/// Builds the rows to append from header-less staging rows.
///
/// A row survives only when both band start and band end are filled in.
/// Survivors keep their order and are padded with empty cells to the width
/// of `output_header`.
pub fn build_append_batch(
    rows: &[Row],
    output_header: &[Cell],
    time_zone: Tz,
) -> Result<AppendBatch, BatchError> {
    let first = rows.first().ok_or(BatchError::NoDataRows)?;
    let shared = BroadcastFields::from_first_row(first);
    let width = output_header.len();

    let emitted: Vec<Row> = rows
        .iter()
        .filter(|row| {
            cell_at(row, staging::BAND_START).is_truthy()
                && cell_at(row, staging::BAND_END).is_truthy()
        })
        .map(|row| emit_row(row, &shared, width, time_zone))
        .collect();

    if emitted.is_empty() {
        return Err(BatchError::NoValidRows);
    }
    Ok(AppendBatch {
        header_to_write: output_header.to_vec(),
        skipped: rows.len() - emitted.len(),
        rows: emitted,
    })
}

fn emit_row(row: &[Cell], shared: &BroadcastFields, width: usize, time_zone: Tz) -> Row {
    let mut out = Vec::with_capacity(width);
    out.push(Cell::text(normalize_time(
        cell_at(row, staging::BAND_START),
        time_zone,
    )));
    out.push(Cell::text(normalize_time(
        cell_at(row, staging::BAND_END),
        time_zone,
    )));
    out.extend(staging::PASSTHROUGH.map(|index| cell_at(row, index).clone()));
    out.push(shared.line.clone());
    out.push(shared.day.clone());
    out.push(shared.direction.clone());
    out.resize(width, Cell::Empty);
    out
}
