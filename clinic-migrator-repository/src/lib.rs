//! # Clinic Migrator Repository
//!
//! This crate provides the store seams the migration engine runs against and
//! their concrete implementations:
//!
//! - [`SourceStore`]: bulk, read-only enumeration of a document collection.
//!   Implemented by [`FirestoreSource`] (Firestore REST API),
//!   [`JsonSnapshotSource`] (exported JSON files) and [`InMemorySource`].
//! - [`DestinationStore`]: exact-match existence checks and single-record
//!   inserts. Implemented by [`PostgresDestination`] and [`InMemoryDestination`].
//!
//! [`SourceConfig`] selects the source implementation at startup, the same way
//! the IPFS and relay crates choose between live and mock backends.

pub mod errors;
pub mod firestore;
pub mod interfaces;
pub mod memory;
pub mod postgres;
pub mod snapshot;

pub use errors::{DestinationStoreError, SourceStoreError};
pub use firestore::FirestoreSource;
pub use interfaces::{DestinationStore, SourceStore};
pub use memory::{InMemoryDestination, InMemorySource};
pub use postgres::PostgresDestination;
pub use snapshot::JsonSnapshotSource;

use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the source document store.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// Read live collections through the Firestore REST API.
    Firestore {
        base_url: String,
        project_id: String,
        database: String,
        access_token: Option<String>,
    },

    /// Read `<dir>/<collection>.json` export files.
    Snapshot { dir: PathBuf },
}

impl SourceConfig {
    /// Create the matching [`SourceStore`] implementation.
    pub fn into_store(self) -> Arc<dyn SourceStore> {
        match self {
            Self::Firestore {
                base_url,
                project_id,
                database,
                access_token,
            } => Arc::new(FirestoreSource::new(
                base_url,
                project_id,
                database,
                access_token,
            )),
            Self::Snapshot { dir } => Arc::new(JsonSnapshotSource::new(dir)),
        }
    }

    /// Short label used in startup logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Firestore {
                project_id,
                database,
                ..
            } => format!("firestore://{}/{}", project_id, database),
            Self::Snapshot { dir } => format!("snapshot://{}", dir.display()),
        }
    }
}
