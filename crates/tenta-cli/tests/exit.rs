use chrono::NaiveDate;

use tenta_cli::exit::ExitStatus;
use tenta_model::SerialEpoch;
use tenta_store::{
    DocumentStore, MemoryStore, ProductDocument, ProductPatch, QueueAction, Result, Session,
    SessionAction, StoreError,
};
use tenta_transform::{DateRange, LegacyProduct, LegacyValue, import_legacy_products};

/// Store that refuses one product id.
struct RejectingStore {
    inner: MemoryStore,
    reject: &'static str,
}

impl DocumentStore for RejectingStore {
    fn get(&self, id: &str) -> Result<Option<ProductDocument>> {
        self.inner.get(id)
    }

    fn upsert(&mut self, document: ProductDocument) -> Result<()> {
        if document.id == self.reject {
            return Err(StoreError::Rejected {
                id: document.id,
                reason: "quota exceeded".to_string(),
            });
        }
        self.inner.upsert(document)
    }

    fn patch(&mut self, id: &str, patch: &ProductPatch) -> Result<ProductDocument> {
        self.inner.patch(id, patch)
    }

    fn list(&self) -> Result<Vec<ProductDocument>> {
        self.inner.list()
    }
}

fn legacy(id: &str, serial: f64) -> LegacyProduct {
    LegacyProduct {
        id: Some(LegacyValue::Text(id.to_string())),
        descripcion: Some("Widget".to_string()),
        precio: Some(LegacyValue::Number(10.0)),
        vigencia: Some(LegacyValue::Number(serial)),
        ..LegacyProduct::default()
    }
}

fn legacy_session() -> Session {
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    )
    .unwrap();
    // 45658 is 2025-01-01.
    let products = [legacy("P1", 45658.0), legacy("P2", 45700.0)];
    let import = import_legacy_products(&products, range, SerialEpoch::default());
    let documents = import
        .records
        .iter()
        .map(ProductDocument::from_legacy)
        .collect();
    Session::new().apply(SessionAction::Queue(QueueAction::Enqueue(documents)))
}

#[test]
fn complete_legacy_import_exits_zero() {
    let mut session = legacy_session();
    let mut store = MemoryStore::new();
    let report = session.commit(&mut store).unwrap();

    let status = ExitStatus::from_report(&report);
    assert_eq!(status, ExitStatus::Success);
    assert_eq!(status.code(), 0);
    assert_eq!(store.len(), 2);
}

#[test]
fn failed_legacy_writes_exit_nonzero() {
    let mut session = legacy_session();
    let mut store = RejectingStore {
        inner: MemoryStore::new(),
        reject: "P2",
    };
    let report = session.commit(&mut store).unwrap();

    assert_eq!(report.written, vec!["P1".to_string()]);
    let status = ExitStatus::from_report(&report);
    assert_eq!(status, ExitStatus::WritesFailed);
    assert_eq!(status.code(), 1);
}
