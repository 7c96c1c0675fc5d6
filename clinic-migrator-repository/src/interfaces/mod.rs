//! This module defines and re-exports the store interfaces the migration
//! engine depends on.
mod destination;
mod source;

pub use destination::DestinationStore;
pub use source::SourceStore;
