//! Timestamped collection snapshots.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::document::ProductDocument;
use crate::error::Result;
use crate::json_store::write_documents;

/// File name of a snapshot taken at `at`: `products-<unix millis>.json`.
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!("products-{}.json", at.timestamp_millis())
}

/// Write `documents` to a new snapshot file in `dir`.
pub fn write_backup(documents: &[ProductDocument], dir: &Path, at: DateTime<Utc>) -> Result<PathBuf> {
    let path = dir.join(backup_file_name(at));
    write_documents(&path, documents)?;
    info!(path = %path.display(), products = documents.len(), "backup written");
    Ok(path)
}
