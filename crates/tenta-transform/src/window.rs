//! Validity window.

use chrono::{Months, NaiveDate};
use serde::Serialize;

use tenta_model::ValidityPolicy;

use crate::error::{Result, TransformError};

/// Inclusive date range a price must fall in to be written.
///
/// A `None` bound is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ValidityWindow {
    /// Build the window for a reference date.
    ///
    /// The start is `as_of` minus `months` calendar months, clamped to the
    /// last day of the month (2024-02-29 minus 12 months is 2023-02-28).
    pub fn new(policy: ValidityPolicy, as_of: NaiveDate, months: u32) -> Result<Self> {
        if months == 0 {
            return Err(TransformError::EmptyWindow);
        }
        let start = as_of
            .checked_sub_months(Months::new(months))
            .ok_or(TransformError::ReferenceDateOutOfRange { as_of, months })?;
        let window = match policy {
            ValidityPolicy::TwoSided => Self {
                start: Some(start),
                end: Some(as_of),
            },
            ValidityPolicy::NotAfter => Self {
                start: None,
                end: Some(as_of),
            },
            ValidityPolicy::NotBefore => Self {
                start: Some(start),
                end: None,
            },
        };
        Ok(window)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}
