//! Error types for the migrator repository.
//! Consolidates and re-exports the errors raised by source and destination stores.
mod destination;
mod source;

pub use destination::DestinationStoreError;
pub use source::SourceStoreError;
