//! Product keys stay out of log output unless data logging is switched on.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::Level;

use tenta_model::redact::REDACTED_VALUE;
use tenta_store::{
    DocumentStore, MemoryStore, ProductDocument, ProductPatch, QueueAction, Result, StoreError,
    WriteQueue, commit,
};

const KEY: &str = "SECRETKEY42";

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_logs(run: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    logs.text()
}

/// Store that refuses every write.
struct RejectingStore;

impl DocumentStore for RejectingStore {
    fn get(&self, _id: &str) -> Result<Option<ProductDocument>> {
        Ok(None)
    }

    fn upsert(&mut self, document: ProductDocument) -> Result<()> {
        Err(StoreError::Rejected {
            id: document.id,
            reason: "read-only".to_string(),
        })
    }

    fn patch(&mut self, id: &str, _patch: &ProductPatch) -> Result<ProductDocument> {
        Err(StoreError::NotFound { id: id.to_string() })
    }

    fn list(&self) -> Result<Vec<ProductDocument>> {
        Ok(Vec::new())
    }
}

#[test]
fn upsert_and_patch_redact_product_keys() {
    let output = capture_logs(|| {
        let mut store = MemoryStore::new();
        store.upsert(ProductDocument::new(KEY, "Widget")).unwrap();
        store
            .patch(KEY, &ProductPatch::new().with_price(5.0))
            .unwrap();
    });

    assert!(output.contains("upsert product"), "{output}");
    assert!(output.contains("patched product"), "{output}");
    assert!(output.contains(REDACTED_VALUE), "{output}");
    assert!(!output.contains(KEY), "{output}");
}

#[test]
fn failed_writes_redact_product_keys() {
    let output = capture_logs(|| {
        let queue = WriteQueue::new()
            .apply(QueueAction::Enqueue(vec![ProductDocument::new(KEY, "Widget")]));
        let report = commit(&queue, &mut RejectingStore).unwrap();
        assert_eq!(report.failed.len(), 1);
    });

    assert!(output.contains("product write failed"), "{output}");
    assert!(!output.contains(KEY), "{output}");
}
