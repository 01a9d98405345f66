//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Structural input errors. Any of these aborts the whole merge.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the maximum allowed size.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Extension is not a supported spreadsheet format.
    #[error("unsupported input format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Decoding Errors ===
    /// CSV record could not be decoded.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Workbook could not be opened or a sheet could not be read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook has no sheets.
    #[error("workbook contains no sheets: {path}")]
    NoSheets { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
