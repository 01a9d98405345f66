//! Normalization of raw price-list cells.
//!
//! - **date**: validity dates from spreadsheet serials or `d/m/y` text
//! - **price**: localized prices (`1.234,56`)

pub mod date;
pub mod price;

pub use date::{format_validity, parse_date_text, parse_validity_cell, serial_to_date};
pub use price::{parse_price_cell, parse_price_text};
