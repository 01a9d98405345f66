//! Configuration options for price-list reconciliation.

use serde::{Deserialize, Serialize};

/// Description used when neither the price list nor the equivalence table has one.
pub const NO_DESCRIPTION: &str = "Sin descripción";

/// Barcode placeholder shown for products missing from the equivalence table.
pub const NO_BARCODE: &str = "Sin código";

/// Length of the validity window, counted back from the reference date.
pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// Which bounds of the validity window are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidityPolicy {
    /// `[as_of - window, as_of]`, both bounds inclusive.
    #[default]
    TwoSided,
    /// Only reject dates after the reference date.
    NotAfter,
    /// Only reject dates older than the window start.
    NotBefore,
}

/// Day-count convention for spreadsheet date serials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SerialEpoch {
    /// Serial 1 is 1899-12-31 and serial 2 is 1900-01-01, on a proleptic
    /// Gregorian calendar. Serial 60 is 1900-02-28.
    #[default]
    Proleptic1899,
    /// Lotus 1-2-3 compatible: serial 1 is 1900-01-01 and serial 60 is the
    /// nonexistent 1900-02-29, which never parses.
    Lotus1900,
}

/// Options for merging an equivalence table with a price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub validity_policy: ValidityPolicy,

    /// Window length in months (must be at least one).
    pub window_months: u32,

    pub serial_epoch: SerialEpoch,

    /// Barcode emitted for products with no equivalence entry.
    /// `None` leaves the barcode list empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_placeholder: Option<String>,

    pub description_placeholder: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            validity_policy: ValidityPolicy::default(),
            window_months: DEFAULT_WINDOW_MONTHS,
            serial_epoch: SerialEpoch::default(),
            barcode_placeholder: None,
            description_placeholder: NO_DESCRIPTION.to_string(),
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validity_policy(mut self, policy: ValidityPolicy) -> Self {
        self.validity_policy = policy;
        self
    }

    pub fn with_window_months(mut self, months: u32) -> Self {
        self.window_months = months;
        self
    }

    pub fn with_serial_epoch(mut self, epoch: SerialEpoch) -> Self {
        self.serial_epoch = epoch;
        self
    }

    pub fn with_barcode_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.barcode_placeholder = placeholder;
        self
    }

    pub fn with_description_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.description_placeholder = placeholder.into();
        self
    }
}
