//! Import session state.

use crate::error::Result;
use crate::queue::{CommitReport, QueueAction, WriteQueue, commit};
use crate::store::DocumentStore;

/// Change to a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Queue(QueueAction),
    /// A commit wrote these ids.
    Committed(Vec<String>),
    /// Forget queued work and the write tally.
    Reset,
}

/// Queue plus the number of documents written since the session started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub queue: WriteQueue,
    pub total_writes: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn apply(self, action: SessionAction) -> Self {
        match action {
            SessionAction::Queue(action) => Self {
                queue: self.queue.apply(action),
                ..self
            },
            SessionAction::Committed(ids) => Self {
                total_writes: self.total_writes + ids.len(),
                queue: self.queue.apply(QueueAction::MarkWritten(ids)),
            },
            SessionAction::Reset => Self::default(),
        }
    }

    /// Commit the queue and fold the result back into the session.
    ///
    /// Failed documents stay queued.
    pub fn commit<S>(&mut self, store: &mut S) -> Result<CommitReport>
    where
        S: DocumentStore + ?Sized,
    {
        let report = commit(&self.queue, store)?;
        let session = std::mem::take(self);
        *self = session.apply(SessionAction::Committed(report.written.clone()));
        Ok(report)
    }
}
