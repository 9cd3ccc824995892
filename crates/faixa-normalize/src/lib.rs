//! Field normalizers for staged schedule rows.
//!
//! - **time**: coerce a time-like cell to a 4-digit `HHMM` code
//! - **direction**: coerce free-text direction to `0`, `1` or `2`
//! - **numeric**: sheet-style numeric text detection

pub mod direction;
pub mod numeric;
pub mod time;

pub use direction::normalize_direction;
pub use numeric::{is_numeric_text, left_pad};
pub use time::{TIME_CODE_WIDTH, normalize_time};
