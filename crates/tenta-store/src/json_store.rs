//! JSON file backed store.
//!
//! The whole collection lives in one pretty-printed JSON array. Changes are
//! kept in memory until [`DocumentStore::flush`], which replaces the file
//! atomically (temp file + rename).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::document::{ProductDocument, ProductPatch};
use crate::error::{Result, StoreError};
use crate::store::{DocumentStore, MemoryStore};

/// Product collection stored in a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    documents: MemoryStore,
    dirty: bool,
}

impl JsonFileStore {
    /// Open the collection at `path`. A missing file is an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let documents = if path.exists() {
            read_documents(&path)?.into_iter().collect()
        } else {
            MemoryStore::new()
        };
        info!(path = %path.display(), products = documents.len(), "opened product store");
        Ok(Self {
            path,
            documents,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl DocumentStore for JsonFileStore {
    fn get(&self, id: &str) -> Result<Option<ProductDocument>> {
        self.documents.get(id)
    }

    fn upsert(&mut self, document: ProductDocument) -> Result<()> {
        self.documents.upsert(document)?;
        self.dirty = true;
        Ok(())
    }

    fn patch(&mut self, id: &str, patch: &ProductPatch) -> Result<ProductDocument> {
        let document = self.documents.patch(id, patch)?;
        self.dirty = true;
        Ok(document)
    }

    fn list(&self) -> Result<Vec<ProductDocument>> {
        self.documents.list()
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        write_documents(&self.path, &self.documents.list()?)?;
        self.dirty = false;
        info!(path = %self.path.display(), products = self.documents.len(), "saved product store");
        Ok(())
    }
}

/// Read a JSON array of products.
pub fn read_documents(path: &Path) -> Result<Vec<ProductDocument>> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Deserialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Write products as a pretty JSON array, replacing `path` atomically.
pub fn write_documents(path: &Path, documents: &[ProductDocument]) -> Result<()> {
    let json = serde_json::to_vec_pretty(documents).map_err(|source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|source| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(&json).map_err(|source| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source,
    })?;
    file.sync_all().map_err(|source| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })
}
