//! Price-list reconciliation.
//!
//! This crate turns two decoded spreadsheets into a reviewed list of price
//! updates:
//!
//! - **equivalence**: barcode -> product key lookup built from the equivalence table
//! - **normalization**: spreadsheet date serials, `d/m/y` text dates and localized prices
//! - **window**: validity window derived from an injected reference date
//! - **merge**: per-row classification into to-write / skipped / out-of-validity
//! - **legacy**: filtered import of the old JSON product dump

pub mod equivalence;
pub mod error;
pub mod legacy;
pub mod merge;
pub mod normalization;
pub mod window;

pub use equivalence::{EquivalenceLookup, build_equivalence_lookup};
pub use error::{Result, TransformError};
pub use legacy::{
    DateRange, LegacyImport, LegacyProduct, LegacyRecord, LegacyValue, import_legacy_products,
};
pub use merge::{Reconciler, merge_tables};
pub use normalization::{
    format_validity, parse_date_text, parse_price_cell, parse_price_text, parse_validity_cell,
    serial_to_date,
};
pub use window::ValidityWindow;
