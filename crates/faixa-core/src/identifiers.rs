//! Service-order (OSO) pair validation and placement.

use std::sync::LazyLock;

use regex::Regex;

use faixa_model::{Row, cell_at};

use crate::error::{IdentifierField, MacroError, Result};

static SERVICE_ORDER_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6}$").expect("service order pattern is valid"));

static LINE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}(\d{2})?$").expect("line pattern is valid"));

/// A validated pair, kept with the sheet row it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOrder {
    pub sheet_row: usize,
    pub cells: Row,
}

/// Validates staged service-order pairs, all or nothing.
///
/// `rows` start at sheet row `first_row`. Pairs with either cell blank are
/// skipped. The first invalid pair aborts the whole batch and is reported
/// with its sheet row number.
pub fn validate_service_orders(rows: &[Row], first_row: usize) -> Result<Vec<ServiceOrder>> {
    let candidates: Vec<ServiceOrder> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| cell_at(row, 0).is_truthy() && cell_at(row, 1).is_truthy())
        .map(|(offset, row)| ServiceOrder {
            sheet_row: first_row + offset,
            cells: vec![cell_at(row, 0).clone(), cell_at(row, 1).clone()],
        })
        .collect();

    if candidates.is_empty() {
        return Err(MacroError::NoValidRows);
    }
    for order in &candidates {
        check(order, 0, IdentifierField::ServiceOrder, &SERVICE_ORDER_FORMAT)?;
        check(order, 1, IdentifierField::Line, &LINE_FORMAT)?;
    }
    Ok(candidates)
}

fn check(order: &ServiceOrder, index: usize, field: IdentifierField, format: &Regex) -> Result<()> {
    let value = order.cells[index].to_text();
    if format.is_match(&value) {
        return Ok(());
    }
    Err(MacroError::InvalidIdentifierFormat {
        row: order.sheet_row,
        field,
        value,
    })
}

/// Sheet row where new pairs go, given the existing pair columns from row 2
/// down.
///
/// Scans from the bottom for the last row holding either half of a pair, so
/// data further down in other columns does not push the insert point.
pub fn next_service_order_row(existing: &[Row]) -> usize {
    existing
        .iter()
        .rposition(|row| cell_at(row, 0).is_truthy() || cell_at(row, 1).is_truthy())
        .map_or(2, |index| index + 3)
}
