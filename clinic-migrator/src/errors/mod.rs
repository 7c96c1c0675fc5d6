//! Error types for the clinic migrator.

use clinic_migrator_repository::{DestinationStoreError, SourceStoreError};
use thiserror::Error;

/// Errors that abort an entity run.
///
/// Per-record failures never surface here; they are counted in the summary.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The bulk read of the source collection failed.
    #[error("Failed to fetch {entity} from source: {source}")]
    Fetch {
        entity: &'static str,
        #[source]
        source: SourceStoreError,
    },
}

impl RunnerError {
    pub fn fetch(entity: &'static str, source: SourceStoreError) -> Self {
        Self::Fetch { entity, source }
    }
}

/// Errors that can occur during migrator initialization or execution.
#[derive(Error, Debug)]
pub enum MigratorError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An entity name that no adapter is registered for.
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    /// Destination store error, e.g. failing to connect at startup.
    #[error("Destination error: {0}")]
    Destination(#[from] DestinationStoreError),

    /// Runner error.
    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),
}

impl MigratorError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity(name.into())
    }
}
