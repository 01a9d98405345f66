//! Import of the legacy JSON product dump.
//!
//! The dump is an array of objects with Spanish field names
//! (`id`, `descripcion`, `precio`, `lista`, `listadesc`, `vigencia`) where
//! `vigencia` is a spreadsheet date serial. Only products whose validity
//! falls inside an explicit inclusive date range are kept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tenta_model::{SerialEpoch, format_number};

use crate::error::{Result, TransformError};
use crate::normalization::{parse_price_text, serial_to_date};

/// Scalar field that may have been exported as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyValue {
    Number(f64),
    Text(String),
}

impl LegacyValue {
    fn as_text(&self) -> Option<String> {
        match self {
            Self::Number(value) => Some(format_number(*value)),
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// One entry of the legacy dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyProduct {
    pub id: Option<LegacyValue>,
    pub descripcion: Option<String>,
    pub precio: Option<LegacyValue>,
    pub lista: Option<LegacyValue>,
    pub listadesc: Option<String>,
    pub vigencia: Option<LegacyValue>,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(TransformError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Accepted legacy product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyRecord {
    pub id: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub list: Option<String>,
    pub list_description: Option<String>,
    pub validity: NaiveDate,
}

/// Outcome of a legacy import.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegacyImport {
    pub records: Vec<LegacyRecord>,
    pub missing_id: usize,
    pub invalid_validity: usize,
    pub out_of_range: usize,
}

/// Filter the legacy dump down to products valid within `range`.
pub fn import_legacy_products(
    products: &[LegacyProduct],
    range: DateRange,
    epoch: SerialEpoch,
) -> LegacyImport {
    let mut import = LegacyImport::default();
    for (index, product) in products.iter().enumerate() {
        let Some(id) = product.id.as_ref().and_then(LegacyValue::as_text) else {
            debug!(index, "legacy product without id");
            import.missing_id += 1;
            continue;
        };
        let Some(validity) = product
            .vigencia
            .as_ref()
            .and_then(LegacyValue::as_number)
            .and_then(|serial| serial_to_date(serial, epoch))
        else {
            import.invalid_validity += 1;
            continue;
        };
        if !range.contains(validity) {
            import.out_of_range += 1;
            continue;
        }
        let price = match &product.precio {
            Some(LegacyValue::Number(value)) => Some(*value),
            Some(LegacyValue::Text(text)) => parse_price_text(text),
            None => None,
        };
        import.records.push(LegacyRecord {
            id,
            description: product.descripcion.clone(),
            price,
            list: product.lista.as_ref().and_then(LegacyValue::as_text),
            list_description: product.listadesc.clone(),
            validity,
        });
    }
    info!(
        accepted = import.records.len(),
        missing_id = import.missing_id,
        invalid_validity = import.invalid_validity,
        out_of_range = import.out_of_range,
        "legacy import filtered"
    );
    import
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn keeps_products_inside_range() {
        let products: Vec<LegacyProduct> = serde_json::from_str(
            r#"[
                {"id": "A1", "descripcion": "Yerba", "precio": 1500, "lista": 1, "listadesc": "General", "vigencia": 45658},
                {"id": 77, "descripcion": "Mate", "precio": "2.000,00", "vigencia": "45536"},
                {"id": "B2", "vigencia": 40000},
                {"descripcion": "sin id", "vigencia": 45658},
                {"id": "C3", "vigencia": "pronto"}
            ]"#,
        )
        .expect("parse legacy dump");
        let range = DateRange::new(ymd(2024, 9, 1), ymd(2025, 9, 30)).unwrap();

        let import = import_legacy_products(&products, range, SerialEpoch::Proleptic1899);

        assert_eq!(import.records.len(), 2);
        assert_eq!(import.records[0].id, "A1");
        assert_eq!(import.records[0].list.as_deref(), Some("1"));
        assert_eq!(import.records[0].validity, ymd(2025, 1, 1));
        assert_eq!(import.records[1].id, "77");
        assert_eq!(import.records[1].price, Some(2000.0));
        assert_eq!(import.records[1].validity, ymd(2024, 9, 1));
        assert_eq!(import.out_of_range, 1);
        assert_eq!(import.missing_id, 1);
        assert_eq!(import.invalid_validity, 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            DateRange::new(ymd(2025, 1, 2), ymd(2025, 1, 1)),
            Err(TransformError::InvertedRange { .. })
        ));
    }
}
