//! Price-list reconciliation.
//!
//! Each price-list row (header skipped) is classified exactly once:
//!
//! 1. A blank product key means the row is not price data: no record, no count.
//! 2. A blank validity or price cell, or a validity that does not parse, is
//!    [`RecordStatus::Skipped`].
//! 3. A validity date outside the [`ValidityWindow`] is
//!    [`RecordStatus::OutOfValidity`].
//! 4. A price that does not parse is [`RecordStatus::Skipped`].
//! 5. Everything else is [`RecordStatus::ToWrite`], enriched with barcodes
//!    from the equivalence lookup.
//!
//! The transform is pure: the reference date is passed in and nothing is
//! read from the clock or written anywhere.

use chrono::NaiveDate;
use tracing::{debug, info, info_span};

use tenta_model::{
    CellValue, MergeOptions, MergeOutcome, MergedRecord, RecordStatus, SkipReason, Table,
};

use crate::equivalence::{EquivalenceLookup, build_equivalence_lookup};
use crate::error::{Result, TransformError};
use crate::normalization::{format_validity, parse_price_cell, parse_validity_cell};
use crate::window::ValidityWindow;

pub const PRODUCT_KEY_COL: usize = 0;
pub const DESCRIPTION_COL: usize = 1;
pub const VALIDITY_COL: usize = 4;
pub const PRICE_COL: usize = 5;

/// Classifies price-list rows against an equivalence lookup.
#[derive(Debug, Clone)]
pub struct Reconciler {
    lookup: EquivalenceLookup,
    window: ValidityWindow,
    options: MergeOptions,
}

impl Reconciler {
    pub fn new(lookup: EquivalenceLookup, options: MergeOptions, as_of: NaiveDate) -> Result<Self> {
        let window = ValidityWindow::new(options.validity_policy, as_of, options.window_months)?;
        Ok(Self {
            lookup,
            window,
            options,
        })
    }

    /// Build from a decoded equivalence table.
    pub fn from_table(equivalences: &Table, options: MergeOptions, as_of: NaiveDate) -> Result<Self> {
        require_header(equivalences)?;
        Self::new(build_equivalence_lookup(equivalences), options, as_of)
    }

    pub fn window(&self) -> ValidityWindow {
        self.window
    }

    pub fn lookup(&self) -> &EquivalenceLookup {
        &self.lookup
    }

    /// Classify one price-list row. `None` only for rows without a product key.
    pub fn classify_row(&self, row: &[CellValue]) -> Option<MergedRecord> {
        let product_id = Table::cell(row, PRODUCT_KEY_COL).as_text()?;
        let validity_cell = Table::cell(row, VALIDITY_COL);
        let price_cell = Table::cell(row, PRICE_COL);
        let equivalence = self.lookup.get(&product_id);

        let description = Table::cell(row, DESCRIPTION_COL)
            .as_text()
            .or_else(|| equivalence.and_then(|entry| entry.description.clone()))
            .unwrap_or_else(|| self.options.description_placeholder.clone());

        let mut record = MergedRecord {
            product_id,
            description,
            barcodes: Vec::new(),
            price: None,
            validity: None,
            validity_text: validity_cell.as_text().unwrap_or_default(),
            status: RecordStatus::Skipped,
            reason: None,
        };

        if validity_cell.is_blank() {
            return Some(skip(record, RecordStatus::Skipped, SkipReason::MissingValidity));
        }
        if price_cell.is_blank() {
            return Some(skip(record, RecordStatus::Skipped, SkipReason::MissingPrice));
        }

        let Some(validity) = parse_validity_cell(validity_cell, self.options.serial_epoch) else {
            return Some(skip(record, RecordStatus::Skipped, SkipReason::InvalidValidity));
        };
        record.validity = Some(validity);
        record.validity_text = format_validity(validity);

        if !self.window.contains(validity) {
            return Some(skip(
                record,
                RecordStatus::OutOfValidity,
                SkipReason::OutsideWindow,
            ));
        }

        let Some(price) = parse_price_cell(price_cell) else {
            return Some(skip(record, RecordStatus::Skipped, SkipReason::InvalidPrice));
        };

        record.barcodes = match equivalence {
            Some(entry) => entry.barcodes.iter().cloned().collect(),
            None => self.options.barcode_placeholder.iter().cloned().collect(),
        };
        record.price = Some(price);
        record.status = RecordStatus::ToWrite;
        Some(record)
    }

    /// Lazily classify every data row of a price list, in input order.
    pub fn classify_rows<'a>(&'a self, prices: &'a Table) -> impl Iterator<Item = MergedRecord> + 'a {
        prices
            .data_rows()
            .enumerate()
            .filter_map(move |(index, row)| {
                let record = self.classify_row(row);
                match &record {
                    Some(record) => debug!(
                        row = index + 2,
                        status = %record.status,
                        reason = ?record.reason,
                        "classified price row"
                    ),
                    None => debug!(row = index + 2, "ignored row without product key"),
                }
                record
            })
    }

    /// Classify a whole price list.
    pub fn merge(&self, prices: &Table) -> MergeOutcome {
        self.classify_rows(prices).collect()
    }

    /// Classify a decoded price list, which must at least have a header row.
    pub fn merge_table(&self, prices: &Table) -> Result<MergeOutcome> {
        require_header(prices)?;
        let span = info_span!("merge", prices = %prices.name, window = ?self.window);
        let _guard = span.enter();

        let outcome = self.merge(prices);
        info!(
            rows = prices.data_len(),
            to_write = outcome.counters.to_write,
            skipped = outcome.counters.skipped,
            out_of_validity = outcome.counters.out_of_validity,
            "merge complete"
        );
        Ok(outcome)
    }
}

fn require_header(table: &Table) -> Result<()> {
    if table.is_empty() {
        return Err(TransformError::MissingHeader {
            table: table.name.clone(),
        });
    }
    Ok(())
}

fn skip(mut record: MergedRecord, status: RecordStatus, reason: SkipReason) -> MergedRecord {
    record.status = status;
    record.reason = Some(reason);
    record
}

/// Reconcile an equivalence table with a price list.
///
/// Fails only on structural problems: a table with no header row or an
/// unusable validity window.
pub fn merge_tables(
    equivalences: &Table,
    prices: &Table,
    options: &MergeOptions,
    as_of: NaiveDate,
) -> Result<MergeOutcome> {
    for table in [equivalences, prices] {
        require_header(table)?;
    }
    Reconciler::from_table(equivalences, options.clone(), as_of)?.merge_table(prices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn reconciler(as_of: NaiveDate) -> Reconciler {
        Reconciler::new(EquivalenceLookup::default(), MergeOptions::default(), as_of).unwrap()
    }

    fn price_row(key: &str, validity: CellValue, price: CellValue) -> Vec<CellValue> {
        vec![
            CellValue::from(key),
            CellValue::from("Widget"),
            CellValue::Empty,
            CellValue::Empty,
            validity,
            price,
        ]
    }

    #[test]
    fn blank_key_yields_no_record() {
        let row = price_row("", "01/01/25".into(), "10".into());
        assert!(reconciler(ymd(2025, 6, 1)).classify_row(&row).is_none());
    }

    #[test]
    fn missing_cells_are_skipped_with_reason() {
        let r = reconciler(ymd(2025, 6, 1));
        let record = r
            .classify_row(&price_row("P1", CellValue::Empty, "10".into()))
            .unwrap();
        assert_eq!(record.status, RecordStatus::Skipped);
        assert_eq!(record.reason, Some(SkipReason::MissingValidity));

        let record = r
            .classify_row(&price_row("P1", "01/01/25".into(), CellValue::Empty))
            .unwrap();
        assert_eq!(record.reason, Some(SkipReason::MissingPrice));
        assert!(record.price.is_none());
    }

    #[test]
    fn window_is_checked_before_price() {
        let record = reconciler(ymd(2025, 6, 1))
            .classify_row(&price_row("P1", "01/01/20".into(), "abc".into()))
            .unwrap();
        assert_eq!(record.status, RecordStatus::OutOfValidity);
        assert_eq!(record.validity, Some(ymd(2020, 1, 1)));
        assert!(record.price.is_none());
        assert!(record.barcodes.is_empty());
    }

    #[test]
    fn serial_validity_is_accepted() {
        let record = reconciler(ymd(2025, 6, 1))
            .classify_row(&price_row("P1", CellValue::Number(45658.0), CellValue::Number(99.5)))
            .unwrap();
        assert_eq!(record.status, RecordStatus::ToWrite);
        assert_eq!(record.validity_text, "1/1/2025");
        assert_eq!(record.price, Some(99.5));
    }

    #[test]
    fn unmatched_product_uses_placeholders() {
        let options = MergeOptions::default()
            .with_barcode_placeholder(Some(tenta_model::NO_BARCODE.to_string()));
        let r = Reconciler::new(EquivalenceLookup::default(), options, ymd(2025, 6, 1)).unwrap();
        let mut row = price_row("P9", "01/01/25".into(), "10".into());
        row[DESCRIPTION_COL] = CellValue::Empty;

        let record = r.classify_row(&row).unwrap();
        assert_eq!(record.barcodes, vec![tenta_model::NO_BARCODE.to_string()]);
        assert_eq!(record.description, tenta_model::NO_DESCRIPTION);
    }
}
