//! Price-list ingestion.
//!
//! Decodes the spreadsheets a clerk uploads (equivalence table and price
//! list) into positional [`Table`]s. Decoding failures are structural and
//! surface as [`IngestError`]; row-level problems are left to the merge.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tenta_ingest::read_table;
//!
//! let equivalences = read_table(Path::new("equivalencias.xlsx"))?;
//! let prices = read_table(Path::new("precios.csv"))?;
//! ```

mod csv;
mod error;
mod workbook;

use std::fs::File;
use std::path::Path;

use tracing::info;

pub use tenta_model::Table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Decoders ===
pub use crate::csv::{read_csv_from, read_csv_table};
pub use workbook::{MAX_COLS, MAX_ROWS, read_workbook_table};

/// Maximum input file size (100 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Spreadsheet formats accepted as merge input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    /// Anything `calamine` can open: xlsx, xlsm, xlsb, xls, ods.
    Workbook,
}

impl InputFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Read a spreadsheet of any supported format into a [`Table`].
pub fn read_table(path: &Path) -> Result<Table> {
    let format = InputFormat::from_path(path)?;
    check_file_size(path)?;
    let table = match format {
        InputFormat::Csv => read_csv_table(path)?,
        InputFormat::Workbook => read_workbook_table(path)?,
    };
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        "loaded input table"
    );
    Ok(table)
}

/// Check file size against [`MAX_INPUT_FILE_SIZE`].
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_INPUT_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| not_found_or_read(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

pub(crate) fn open_checked(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| not_found_or_read(path, e))
}

fn not_found_or_read(path: &Path, source: std::io::Error) -> IngestError {
    if source.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats_by_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("precios.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("equivalencias.xlsx")).unwrap(),
            InputFormat::Workbook
        );
        assert_eq!(
            InputFormat::from_path(Path::new("old.xls")).unwrap(),
            InputFormat::Workbook
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("notes")),
            Err(IngestError::UnsupportedFormat { .. })
        ));
    }
}
