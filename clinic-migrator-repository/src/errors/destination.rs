//! Error types for the destination relational store.
use thiserror::Error;

/// Represents errors that can occur while checking for or inserting a record.
///
/// These are per-record failures: the runner counts them and moves on to the
/// next record.
#[derive(Debug, Error)]
pub enum DestinationStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Empty filter for table {0}")]
    EmptyFilter(String),

    #[error("Natural key field {0} is missing from the record")]
    MissingKeyField(String),

    #[error("Destination call timed out after {0}s")]
    Timeout(u64),

    #[error("Destination unavailable: {0}")]
    Unavailable(String),
}

impl DestinationStoreError {
    /// Create an invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier(name.into())
    }

    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
