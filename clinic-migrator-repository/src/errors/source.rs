//! Error types for source document stores.
use thiserror::Error;

/// Represents errors that can occur while reading a source collection.
///
/// Any of these aborts the run for the collection being read: the migration
/// never works from a partial snapshot.
#[derive(Debug, Error)]
pub enum SourceStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Snapshot fetch timed out after {0}s")]
    Timeout(u64),
}

impl SourceStoreError {
    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a collection not found error.
    pub fn collection_not_found(collection: impl Into<String>) -> Self {
        Self::CollectionNotFound(collection.into())
    }
}

impl From<serde_json::Error> for SourceStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
