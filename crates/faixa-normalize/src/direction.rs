//! Direction ("Sentido") normalization.

use faixa_model::Cell;

/// Digits searched for, in priority order.
const DIRECTION_CODES: [&str; 3] = ["0", "1", "2"];

/// Coerces a free-text direction such as `"Sentido 1 - Ida"` to its code.
///
/// Text containing `0` yields `"0"`, otherwise text containing `1` yields
/// `"1"`, otherwise text containing `2` yields `"2"`. The order is fixed and
/// ignores where the digit appears, so `"1 e 0"` is `"0"`. Text with none of
/// the digits is returned trimmed. Non-text cells pass through unchanged.
pub fn normalize_direction(value: &Cell) -> Cell {
    let Some(text) = value.as_text() else {
        return value.clone();
    };
    match DIRECTION_CODES.iter().find(|code| text.contains(**code)) {
        Some(code) => Cell::text(*code),
        None => Cell::text(text.trim()),
    }
}
