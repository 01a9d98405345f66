//! Document store abstraction.

use std::collections::BTreeMap;

use tracing::debug;

use tenta_model::redact::redact_value;

use crate::document::{ProductDocument, ProductPatch};
use crate::error::{Result, StoreError};

/// Keyed product collection.
///
/// `upsert` is idempotent: writing the same document twice leaves the store
/// as after the first write. Fields an import does not own (the photo URL)
/// survive an upsert.
pub trait DocumentStore {
    fn get(&self, id: &str) -> Result<Option<ProductDocument>>;

    fn upsert(&mut self, document: ProductDocument) -> Result<()>;

    /// Apply a manual edit to an existing document.
    fn patch(&mut self, id: &str, patch: &ProductPatch) -> Result<ProductDocument>;

    /// All documents, ordered by id.
    fn list(&self) -> Result<Vec<ProductDocument>>;

    /// Persist pending changes. In-memory stores have nothing to do.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory store ordered by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, ProductDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn insert(&mut self, document: ProductDocument) {
        match self.documents.get_mut(&document.id) {
            Some(existing) => existing.absorb(document),
            None => {
                self.documents.insert(document.id.clone(), document);
            }
        }
    }
}

impl FromIterator<ProductDocument> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = ProductDocument>>(iter: I) -> Self {
        let mut store = Self::new();
        for document in iter {
            store.insert(document);
        }
        store
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<ProductDocument>> {
        Ok(self.documents.get(id).cloned())
    }

    fn upsert(&mut self, document: ProductDocument) -> Result<()> {
        debug!(id = redact_value(&document.id), "upsert product");
        self.insert(document);
        Ok(())
    }

    fn patch(&mut self, id: &str, patch: &ProductPatch) -> Result<ProductDocument> {
        let document = self
            .documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        document.apply(patch);
        debug!(id = redact_value(id), "patched product");
        Ok(document.clone())
    }

    fn list(&self) -> Result<Vec<ProductDocument>> {
        Ok(self.documents.values().cloned().collect())
    }
}
