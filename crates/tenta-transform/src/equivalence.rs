//! Barcode equivalence lookup.
//!
//! The equivalence table maps scanned barcodes to product keys:
//! column 0 is the barcode, column 1 the product key and column 2 an
//! optional description. Several rows may share a product key.

use std::collections::BTreeMap;

use tracing::debug;

use tenta_model::{EquivalenceRecord, Table};

pub const BARCODE_COL: usize = 0;
pub const PRODUCT_KEY_COL: usize = 1;
pub const DESCRIPTION_COL: usize = 2;

/// Equivalence records keyed by product key.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceLookup {
    entries: BTreeMap<String, EquivalenceRecord>,
}

impl EquivalenceLookup {
    pub fn get(&self, product_key: &str) -> Option<&EquivalenceRecord> {
        self.entries.get(product_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquivalenceRecord> {
        self.entries.values()
    }

    /// Add one equivalence row.
    pub fn insert(&mut self, product_key: &str, barcode: String, description: Option<String>) {
        let entry = self
            .entries
            .entry(product_key.to_string())
            .or_insert_with(|| EquivalenceRecord::new(product_key));
        entry.barcodes.insert(barcode);
        if entry.description.is_none() {
            entry.description = description;
        }
    }
}

/// Group the equivalence table (header skipped) by product key.
///
/// Rows need both a barcode and a product key; anything else is ignored.
pub fn build_equivalence_lookup(table: &Table) -> EquivalenceLookup {
    let mut lookup = EquivalenceLookup::default();
    let mut ignored = 0usize;
    for row in table.data_rows() {
        let (Some(barcode), Some(product_key)) = (
            Table::cell(row, BARCODE_COL).as_text(),
            Table::cell(row, PRODUCT_KEY_COL).as_text(),
        ) else {
            ignored += 1;
            continue;
        };
        lookup.insert(&product_key, barcode, Table::cell(row, DESCRIPTION_COL).as_text());
    }
    debug!(
        table = %table.name,
        products = lookup.len(),
        ignored,
        "built equivalence lookup"
    );
    lookup
}

#[cfg(test)]
mod tests {
    use tenta_model::CellValue;

    use super::*;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|cell| CellValue::from(*cell)).collect()
    }

    #[test]
    fn groups_barcodes_and_keeps_first_description() {
        let table = Table::from_rows(
            "equivalencias",
            vec![
                row(&["codigo", "producto", "descripcion"]),
                row(&["111", "P1", ""]),
                row(&["222", "P1", "Widget"]),
                row(&["111", "P1", "Widget XL"]),
                row(&["333", "P2", "Gadget"]),
            ],
        );

        let lookup = build_equivalence_lookup(&table);

        assert_eq!(lookup.len(), 2);
        let p1 = lookup.get("P1").expect("P1 entry");
        assert_eq!(
            p1.barcodes.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["111", "222"]
        );
        assert_eq!(p1.description.as_deref(), Some("Widget"));
    }

    #[test]
    fn rows_without_product_key_are_ignored() {
        let table = Table::from_rows(
            "equivalencias",
            vec![
                row(&["codigo", "producto"]),
                row(&["111", ""]),
                row(&["222"]),
            ],
        );
        assert!(build_equivalence_lookup(&table).is_empty());
    }

    #[test]
    fn rows_without_barcode_are_ignored() {
        let table = Table::from_rows(
            "equivalencias",
            vec![
                row(&["codigo", "producto", "descripcion"]),
                row(&["", "P1", "Widget"]),
                row(&["  ", "P2", "Gadget"]),
            ],
        );
        assert!(build_equivalence_lookup(&table).is_empty());
    }

    #[test]
    fn numeric_keys_match_text_keys() {
        let table = Table::from_rows(
            "equivalencias",
            vec![
                row(&["codigo", "producto"]),
                vec![CellValue::Number(7791234.0), CellValue::Number(1050.0)],
            ],
        );
        let lookup = build_equivalence_lookup(&table);
        let entry = lookup.get("1050").expect("numeric key");
        assert!(entry.barcodes.contains("7791234"));
    }
}
