use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Barcodes and description known for a product key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceRecord {
    pub product_key: String,
    pub barcodes: BTreeSet<String>,
    /// First non-empty description seen for the key.
    pub description: Option<String>,
}

impl EquivalenceRecord {
    pub fn new(product_key: impl Into<String>) -> Self {
        Self {
            product_key: product_key.into(),
            ..Self::default()
        }
    }
}

/// Classification of a price-list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordStatus {
    ToWrite,
    Skipped,
    OutOfValidity,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 3] = [Self::ToWrite, Self::Skipped, Self::OutOfValidity];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToWrite => "toWrite",
            Self::Skipped => "skipped",
            Self::OutOfValidity => "outOfValidity",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a row was not classified as [`RecordStatus::ToWrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingValidity,
    MissingPrice,
    InvalidValidity,
    InvalidPrice,
    OutsideWindow,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingValidity => "missing validity date",
            Self::MissingPrice => "missing price",
            Self::InvalidValidity => "unparseable validity date",
            Self::InvalidPrice => "unparseable price",
            Self::OutsideWindow => "validity date outside window",
        };
        f.write_str(text)
    }
}

/// One classified row of the price list.
///
/// Only [`RecordStatus::ToWrite`] records carry a price and barcodes; the
/// others are kept so a reviewer can see why they were left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub product_id: String,
    pub description: String,
    pub barcodes: Vec<String>,
    pub price: Option<f64>,
    pub validity: Option<NaiveDate>,
    /// Validity as shown to the clerk (`d/m/yyyy`), or the raw cell text when
    /// it could not be parsed.
    pub validity_text: String,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

impl MergedRecord {
    pub fn is_writable(&self) -> bool {
        self.status == RecordStatus::ToWrite
    }
}

/// Per-status tally of merged records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub to_write: usize,
    pub skipped: usize,
    pub out_of_validity: usize,
}

impl Counters {
    pub fn record(&mut self, status: RecordStatus) {
        match status {
            RecordStatus::ToWrite => self.to_write += 1,
            RecordStatus::Skipped => self.skipped += 1,
            RecordStatus::OutOfValidity => self.out_of_validity += 1,
        }
    }

    pub fn from_records(records: &[MergedRecord]) -> Self {
        let mut counters = Self::default();
        for record in records {
            counters.record(record.status);
        }
        counters
    }

    pub fn get(&self, status: RecordStatus) -> usize {
        match status {
            RecordStatus::ToWrite => self.to_write,
            RecordStatus::Skipped => self.skipped,
            RecordStatus::OutOfValidity => self.out_of_validity,
        }
    }

    pub fn total(&self) -> usize {
        self.to_write + self.skipped + self.out_of_validity
    }
}

/// Result of reconciling an equivalence table with a price list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Records in price-list row order.
    pub records: Vec<MergedRecord>,
    pub counters: Counters,
}

impl MergeOutcome {
    pub fn push(&mut self, record: MergedRecord) {
        self.counters.record(record.status);
        self.records.push(record);
    }

    pub fn writable(&self) -> impl Iterator<Item = &MergedRecord> {
        self.records.iter().filter(|record| record.is_writable())
    }

    pub fn with_status(&self, status: RecordStatus) -> impl Iterator<Item = &MergedRecord> {
        self.records
            .iter()
            .filter(move |record| record.status == status)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<MergedRecord> for MergeOutcome {
    fn from_iter<I: IntoIterator<Item = MergedRecord>>(iter: I) -> Self {
        let mut outcome = Self::default();
        for record in iter {
            outcome.push(record);
        }
        outcome
    }
}
