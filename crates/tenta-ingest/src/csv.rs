//! CSV decoding.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use tenta_model::{CellValue, Table};

use crate::error::{IngestError, Result};
use crate::open_checked;

fn normalize_cell(raw: &str) -> CellValue {
    CellValue::text(raw.trim().trim_matches('\u{feff}'))
}

/// Read a CSV file into a [`Table`]. Every cell is kept as text.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let file = open_checked(path)?;
    let name = table_name(path);
    read_csv_from(name, file).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode CSV from any reader. Fully blank rows are dropped.
pub fn read_csv_from<R: Read>(name: impl Into<String>, reader: R) -> csv::Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut table = Table::new(name);
    for record in reader.records() {
        let record = record?;
        let row: Vec<CellValue> = record.iter().map(normalize_cell).collect();
        if row.iter().all(CellValue::is_blank) {
            continue;
        }
        table.push_row(row);
    }
    debug!(table = %table.name, rows = table.rows.len(), "decoded csv");
    Ok(table)
}

pub(crate) fn table_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
