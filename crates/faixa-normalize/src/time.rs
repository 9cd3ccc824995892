//! Time-band normalization to 4-digit `HHMM` codes.
//!
//! Staging sheets hold band boundaries in whatever shape the person typing
//! produced: a real time value, `"8:00"`, `"08:00:00"` or a bare `800`. All of
//! them collapse to the same code, `"0800"`. Anything else becomes `""`.

use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::Regex;

use faixa_model::Cell;

use crate::numeric::{is_numeric_text, left_pad};

/// Width of a canonical time code.
pub const TIME_CODE_WIDTH: usize = 4;

/// Leading `H:MM` / `HH:MM`; trailing seconds or text are ignored.
static CLOCK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})").expect("clock pattern is valid"));

/// Normalizes a time-like cell to a canonical `HHMM` code.
///
/// Date/time cells are rendered in `time_zone`, the zone the document is
/// configured with. Unrecognized shapes yield an empty code; this never fails.
pub fn normalize_time(value: &Cell, time_zone: Tz) -> String {
    if !value.is_truthy() {
        return String::new();
    }
    if let Cell::DateTime(when) = value {
        return when.with_timezone(&time_zone).format("%H%M").to_string();
    }

    let text = value.to_text();
    let text = text.trim();
    if let Some(captures) = CLOCK_PREFIX.captures(text) {
        return format!("{}{}", left_pad(&captures[1], 2, '0'), &captures[2]);
    }
    if is_numeric_text(text) {
        return left_pad(text, TIME_CODE_WIDTH, '0');
    }
    String::new()
}
