//! Shared data model for the Tenta inventory tools.
//!
//! - **cell**: spreadsheet cell values and decoded tables
//! - **record**: equivalence entries, merged price records and counters
//! - **options**: knobs for the price-list reconciliation
//! - **redact**: the `--log-data` switch for product data in logs

pub mod cell;
pub mod options;
pub mod record;
pub mod redact;

pub use cell::{CellValue, Table, format_number};
pub use options::{
    DEFAULT_WINDOW_MONTHS, MergeOptions, NO_BARCODE, NO_DESCRIPTION, SerialEpoch, ValidityPolicy,
};
pub use record::{
    Counters, EquivalenceRecord, MergeOutcome, MergedRecord, RecordStatus, SkipReason,
};
