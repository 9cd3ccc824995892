//! Numeric text helpers.

/// True when `value` (already trimmed) reads as a finite number.
///
/// Accepts the forms a sheet accepts in a numeric cell: signs, decimals and
/// exponents (`800`, `-1`, `8.5`, `1e3`).
pub fn is_numeric_text(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Left-pads `value` with `fill` up to `width` characters.
///
/// Longer values are returned unchanged.
pub fn left_pad(value: &str, width: usize, fill: char) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let mut padded: String = std::iter::repeat_n(fill, width - len).collect();
    padded.push_str(value);
    padded
}
