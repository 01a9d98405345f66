//! Product documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tenta_model::{MergedRecord, NO_DESCRIPTION};
use tenta_transform::LegacyRecord;

use crate::id::sanitize_id;

/// One product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub barcodes: Vec<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub validity: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ProductDocument {
    pub fn new(product_key: &str, description: impl Into<String>) -> Self {
        Self {
            id: sanitize_id(product_key),
            description: description.into(),
            barcodes: Vec::new(),
            price: None,
            validity: None,
            photo_url: None,
        }
    }

    /// Document for a merged record. Only writable records produce one.
    pub fn from_merged(record: &MergedRecord) -> Option<Self> {
        if !record.is_writable() {
            return None;
        }
        Some(Self {
            id: sanitize_id(&record.product_id),
            description: record.description.clone(),
            barcodes: record.barcodes.clone(),
            price: record.price,
            validity: record.validity,
            photo_url: None,
        })
    }

    pub fn from_legacy(record: &LegacyRecord) -> Self {
        Self {
            id: sanitize_id(&record.id),
            description: record
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            barcodes: Vec::new(),
            price: record.price,
            validity: Some(record.validity),
            photo_url: None,
        }
    }

    /// Overwrite the fields a price import owns, keeping the rest.
    pub fn absorb(&mut self, incoming: ProductDocument) {
        self.description = incoming.description;
        self.barcodes = incoming.barcodes;
        self.price = incoming.price;
        self.validity = incoming.validity;
        if incoming.photo_url.is_some() {
            self.photo_url = incoming.photo_url;
        }
    }

    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(url) = &patch.photo_url {
            self.photo_url = Some(url.clone());
        }
    }
}

/// Manual edit of an existing product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub price: Option<f64>,
    pub photo_url: Option<String>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.photo_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use tenta_model::{RecordStatus, SkipReason};

    use super::*;

    fn merged(status: RecordStatus) -> MergedRecord {
        MergedRecord {
            product_id: "P-1".to_string(),
            description: "Widget".to_string(),
            barcodes: vec!["111".to_string()],
            price: (status == RecordStatus::ToWrite).then_some(10.5),
            validity: NaiveDate::from_ymd_opt(2025, 1, 1),
            validity_text: "1/1/2025".to_string(),
            status,
            reason: (status != RecordStatus::ToWrite).then_some(SkipReason::OutsideWindow),
        }
    }

    #[test]
    fn only_writable_records_become_documents() {
        let doc = ProductDocument::from_merged(&merged(RecordStatus::ToWrite)).unwrap();
        assert_eq!(doc.id, "P1");
        assert_eq!(doc.price, Some(10.5));
        assert!(ProductDocument::from_merged(&merged(RecordStatus::OutOfValidity)).is_none());
    }

    #[test]
    fn absorb_keeps_photo() {
        let mut existing = ProductDocument::new("P1", "Old");
        existing.photo_url = Some("https://img/p1.jpg".to_string());

        existing.absorb(ProductDocument::from_merged(&merged(RecordStatus::ToWrite)).unwrap());

        assert_eq!(existing.description, "Widget");
        assert_eq!(existing.photo_url.as_deref(), Some("https://img/p1.jpg"));
    }

    #[test]
    fn serializes_camel_case_without_empty_photo() {
        let doc = ProductDocument::from_merged(&merged(RecordStatus::ToWrite)).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["validity"], "2025-01-01");
        assert!(json.get("photoUrl").is_none());
    }
}
