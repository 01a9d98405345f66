//! Pending writes and commit.
//!
//! A [`WriteQueue`] is a value: actions produce a new queue and committing
//! never touches it. [`commit`] reports which documents were written and
//! which failed, so applying [`QueueAction::MarkWritten`] with the report
//! leaves exactly the failed subset queued for a retry.

use std::collections::BTreeMap;

use tracing::{info, warn};

use tenta_model::MergeOutcome;
use tenta_model::redact::redact_value;

use crate::document::ProductDocument;
use crate::error::{Result, StoreError};
use crate::store::DocumentStore;

/// Change to a [`WriteQueue`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueueAction {
    /// Queue documents. A queued id is replaced by the newer document.
    Enqueue(Vec<ProductDocument>),
    /// Queue every writable record of a merge.
    EnqueueOutcome(MergeOutcome),
    /// Drop one pending document.
    Remove(String),
    /// Drop documents that reached the store.
    MarkWritten(Vec<String>),
    Clear,
}

/// Documents waiting to be written, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteQueue {
    pending: BTreeMap<String, ProductDocument>,
}

impl WriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn apply(mut self, action: QueueAction) -> Self {
        match action {
            QueueAction::Enqueue(documents) => self.extend(documents),
            QueueAction::EnqueueOutcome(outcome) => self.extend(
                outcome
                    .writable()
                    .filter_map(ProductDocument::from_merged)
                    .collect(),
            ),
            QueueAction::Remove(id) => {
                self.pending.remove(&id);
            }
            QueueAction::MarkWritten(ids) => {
                for id in ids {
                    self.pending.remove(&id);
                }
            }
            QueueAction::Clear => self.pending.clear(),
        }
        self
    }

    fn extend(&mut self, documents: Vec<ProductDocument>) {
        for document in documents {
            self.pending.insert(document.id.clone(), document);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductDocument> {
        self.pending.values()
    }
}

/// A document the store did not accept.
#[derive(Debug)]
pub struct CommitFailure {
    pub id: String,
    pub error: StoreError,
}

/// Result of one commit.
#[derive(Debug, Default)]
pub struct CommitReport {
    pub written: Vec<String>,
    pub failed: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write every queued document to `store`, then flush it.
///
/// Per-document failures are collected in the report. A failed flush means
/// nothing was persisted and is returned as an error.
pub fn commit<S>(queue: &WriteQueue, store: &mut S) -> Result<CommitReport>
where
    S: DocumentStore + ?Sized,
{
    let mut report = CommitReport::default();
    for document in queue.iter() {
        let id = document.id.clone();
        match store.upsert(document.clone()) {
            Ok(()) => report.written.push(id),
            Err(error) => {
                let message = error.to_string();
                warn!(
                    id = redact_value(&id),
                    error = redact_value(&message),
                    "product write failed"
                );
                report.failed.push(CommitFailure { id, error });
            }
        }
    }
    store.flush()?;
    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "commit finished"
    );
    Ok(report)
}
