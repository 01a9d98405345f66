//! Localized price parsing.

use tenta_model::CellValue;

/// Parse a price written with `.` thousands and `,` decimal separators.
///
/// All dots are removed, then the first comma becomes the decimal point.
/// Anything left that is not a plain finite number is rejected.
///
/// ```
/// use tenta_transform::normalization::parse_price_text;
///
/// assert_eq!(parse_price_text("1.234,56"), Some(1234.56));
/// assert_eq!(parse_price_text("abc"), None);
/// ```
pub fn parse_price_text(text: &str) -> Option<f64> {
    let normalized = text.trim().replace('.', "").replacen(',', ".", 1);
    if normalized.is_empty() {
        return None;
    }
    let value = normalized.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a price cell. Numeric cells are taken as-is.
pub fn parse_price_cell(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(value) => value.is_finite().then_some(*value),
        CellValue::Text(text) => parse_price_text(text),
        CellValue::Empty => None,
    }
}
