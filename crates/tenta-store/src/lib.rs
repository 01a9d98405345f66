//! Product catalog storage.
//!
//! - `store` - the [`DocumentStore`] trait and an in-memory implementation
//! - `json_store` - whole-collection JSON file store (sync target)
//! - `queue` / `session` - pending writes, commit with per-document failures
//! - `search` - case-insensitive catalog search and barcode lookup
//! - `backup` - timestamped snapshots

mod backup;
mod document;
mod error;
mod id;
mod json_store;
mod queue;
mod search;
mod session;
mod store;

pub use backup::{backup_file_name, write_backup};
pub use document::{ProductDocument, ProductPatch};
pub use error::{Result, StoreError};
pub use id::{UNKNOWN_ID, sanitize_id};
pub use json_store::{JsonFileStore, read_documents, write_documents};
pub use queue::{CommitFailure, CommitReport, QueueAction, WriteQueue, commit};
pub use search::{find_by_barcode, search};
pub use session::{Session, SessionAction};
pub use store::{DocumentStore, MemoryStore};
