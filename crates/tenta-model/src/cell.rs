//! Spreadsheet cells and decoded tables.

use serde::{Deserialize, Serialize};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A single decoded spreadsheet cell.
///
/// Dates stored as spreadsheet serials arrive as [`CellValue::Number`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Build a text cell, mapping blank strings to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Trimmed textual rendering, `None` when blank.
    ///
    /// Whole numbers render without a fractional part so numeric product
    /// keys read back the way they were typed.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(value) => Some(format_number(*value)),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats a number without trailing zeros (`12.0` -> `12`, `10.50` -> `10.5`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Rows decoded from the first sheet of a spreadsheet or from a CSV file.
///
/// The first row is the header; [`Table::data_rows`] skips it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Source name (file name or sheet name), used in diagnostics.
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header, in input order.
    pub fn data_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Positional cell access; short rows read as empty.
    pub fn cell(row: &[CellValue], index: usize) -> &CellValue {
        row.get(index).unwrap_or(&EMPTY_CELL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_becomes_empty() {
        assert_eq!(CellValue::text("   "), CellValue::Empty);
        assert_eq!(CellValue::from(""), CellValue::Empty);
        assert_eq!(CellValue::from(" P1 "), CellValue::Text(" P1 ".to_string()));
    }

    #[test]
    fn as_text_trims_and_formats_numbers() {
        assert_eq!(CellValue::from(" P1 ").as_text().as_deref(), Some("P1"));
        assert_eq!(CellValue::Number(7791234.0).as_text().as_deref(), Some("7791234"));
        assert_eq!(CellValue::Number(10.5).as_text().as_deref(), Some("10.5"));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let row = vec![CellValue::from("a")];
        assert_eq!(Table::cell(&row, 0), &CellValue::from("a"));
        assert_eq!(Table::cell(&row, 5), &CellValue::Empty);
    }

    #[test]
    fn data_rows_skip_header() {
        let table = Table::from_rows(
            "prices",
            vec![vec!["id".into()], vec!["P1".into()], vec!["P2".into()]],
        );
        assert_eq!(table.data_len(), 2);
        let keys: Vec<_> = table
            .data_rows()
            .map(|row| Table::cell(row, 0).as_text())
            .collect();
        assert_eq!(keys, vec![Some("P1".to_string()), Some("P2".to_string())]);
    }
}
