//! In-memory stores for testing and local development.
//!
//! [`InMemorySource`] serves pre-registered collections and
//! [`InMemoryDestination`] keeps inserted rows per table, answering existence
//! checks with the same exact-match semantics as the PostgreSQL store.
//!
//! # Example
//!
//! ```ignore
//! use clinic_migrator_repository::{InMemoryDestination, InMemorySource};
//!
//! let source = InMemorySource::new();
//! source.register_collection("anamneses", records);
//!
//! let destination = InMemoryDestination::new();
//! // ... run the migration ...
//! assert_eq!(destination.len("anamneses"), 1);
//! ```
mod destination;
mod source;

pub use destination::InMemoryDestination;
pub use source::InMemorySource;
