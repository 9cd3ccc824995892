//! Groups master sheet rows into schedule blocks.
//!
//! A block is the run of time bands sharing one `Linha`, `Dia` and
//! `Sentido`, which is exactly what one time-band append produces.

use serde::Serialize;

use faixa_model::{Cell, Row, SERVICE_ORDER_COLUMNS, TIME_BAND_COLUMNS, cell_at};

/// One line/day/direction block of time bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub line: String,
    pub day: String,
    pub direction: String,
    /// `(start, end)` codes in sheet order.
    pub bands: Vec<(String, String)>,
}

impl Block {
    pub fn first_start(&self) -> Option<&str> {
        self.bands.first().map(|(start, _)| start.as_str())
    }

    pub fn last_end(&self) -> Option<&str> {
        self.bands.last().map(|(_, end)| end.as_str())
    }
}

/// Master sheet contents as blocks plus the service-order count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetOverview {
    pub blocks: Vec<Block>,
    pub service_orders: usize,
}

/// Positions of the columns a block is keyed on, looked up by header name.
struct Columns {
    start: usize,
    end: usize,
    line: usize,
    day: usize,
    direction: usize,
    order: usize,
    order_line: usize,
}

impl Columns {
    fn locate(header: &[Cell]) -> Self {
        let find = |name: &str, fallback: usize| {
            header
                .iter()
                .position(|cell| cell.to_text().trim() == name)
                .unwrap_or(fallback)
        };
        let band = |index: usize| find(TIME_BAND_COLUMNS[index], index);
        Self {
            start: band(0),
            end: band(1),
            line: band(6),
            day: band(7),
            direction: band(8),
            order: find(SERVICE_ORDER_COLUMNS[0], TIME_BAND_COLUMNS.len()),
            order_line: find(SERVICE_ORDER_COLUMNS[1], TIME_BAND_COLUMNS.len() + 1),
        }
    }
}

/// Splits the data rows (header first) into blocks, in order of first
/// appearance.
///
/// Rows without a band start or end do not belong to any block; they are
/// usually rows that only carry a service order.
pub fn overview(table: &[Row]) -> SheetOverview {
    let Some((header, rows)) = table.split_first() else {
        return SheetOverview::default();
    };
    let columns = Columns::locate(header);
    let mut blocks: Vec<Block> = Vec::new();
    let mut service_orders = 0;

    for row in rows {
        if !cell_at(row, columns.order).is_blank() || !cell_at(row, columns.order_line).is_blank() {
            service_orders += 1;
        }
        let start = cell_at(row, columns.start).to_text();
        let end = cell_at(row, columns.end).to_text();
        if start.is_empty() && end.is_empty() {
            continue;
        }
        let line = cell_at(row, columns.line).to_text();
        let day = cell_at(row, columns.day).to_text();
        let direction = cell_at(row, columns.direction).to_text();

        match blocks
            .iter_mut()
            .find(|b| b.line == line && b.day == day && b.direction == direction)
        {
            Some(block) => block.bands.push((start, end)),
            None => blocks.push(Block {
                line,
                day,
                direction,
                bands: vec![(start, end)],
            }),
        }
    }

    SheetOverview {
        blocks,
        service_orders,
    }
}
