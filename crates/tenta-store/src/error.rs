//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Document store error.
#[derive(Debug, Error)]
pub enum StoreError {
    // === File errors ===
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Encoding errors ===
    /// Collection could not be serialized.
    #[error("failed to serialize products for {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Collection file is not a JSON array of products.
    #[error("invalid product file {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Document errors ===
    /// No document with this id.
    #[error("product not found: {id}")]
    NotFound { id: String },

    /// The store refused to write this document.
    #[error("write rejected for {id}: {reason}")]
    Rejected { id: String, reason: String },
}

impl StoreError {
    /// Short hint for resolving the error, when one exists.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { operation, .. } if *operation == "read" => {
                Some("check that the file exists and is readable")
            }
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("check disk space and write permissions")
            }
            Self::Deserialization { .. } => Some("restore the collection from a backup"),
            Self::NotFound { .. } => Some("search the catalog for the right id"),
            Self::Serialization { .. } | Self::Rejected { .. } => None,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_errors_suggest_checking_the_file() {
        let err = StoreError::Io {
            operation: "read",
            path: PathBuf::from("products.json"),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(err.to_string(), "failed to read products.json");
        assert_eq!(
            err.suggestion(),
            Some("check that the file exists and is readable")
        );
    }
}
