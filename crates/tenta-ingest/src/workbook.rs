//! Excel / OpenDocument decoding through `calamine`.
//!
//! Only the first sheet is read. Date cells are kept as spreadsheet serials
//! so the reconciliation applies its own epoch convention.

use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use tracing::{debug, warn};

use tenta_model::{CellValue, Table};

use crate::error::{IngestError, Result};

/// Maximum rows read from a sheet.
pub const MAX_ROWS: usize = 1_048_576;

/// Maximum columns read from a sheet.
pub const MAX_COLS: usize = 256;

/// Read the first sheet of a workbook into a [`Table`].
pub fn read_workbook_table(path: &Path) -> Result<Table> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let Some(sheet_name) = sheet_names.first() else {
        return Err(IngestError::NoSheets {
            path: path.to_path_buf(),
        });
    };
    if sheet_names.len() > 1 {
        debug!(
            path = %path.display(),
            sheet = %sheet_name,
            ignored = sheet_names.len() - 1,
            "reading first sheet only"
        );
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: format!("failed to read sheet '{sheet_name}': {e}"),
        })?;

    let (height, width) = range.get_size();
    if height > MAX_ROWS || width > MAX_COLS {
        warn!(
            path = %path.display(),
            sheet = %sheet_name,
            height,
            width,
            "sheet truncated to {MAX_ROWS}x{MAX_COLS}"
        );
    }

    // Positional columns are relative to A1, not to the first used cell.
    let start_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut table = Table::new(sheet_name.clone());
    for row in range.rows().take(MAX_ROWS) {
        let mut cells = vec![CellValue::Empty; start_col.min(MAX_COLS)];
        cells.extend(
            row.iter()
                .take(MAX_COLS.saturating_sub(start_col))
                .map(cell_from_data),
        );
        if cells.iter().all(CellValue::is_blank) {
            continue;
        }
        table.push_row(cells);
    }
    debug!(path = %path.display(), rows = table.rows.len(), "decoded workbook");
    Ok(table)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::text(text.as_str()),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::text(if *value { "TRUE" } else { "FALSE" }),
        Data::Error(error) => CellValue::text(format!("#{error:?}")),
        Data::DateTime(datetime) => CellValue::Number(datetime.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::text(text.as_str()),
    }
}
