//! PostgreSQL implementation of the destination store.
//!
//! Table and column names come from static entity adapters but are still
//! validated before being spliced into SQL; every value is bound as a
//! parameter.
mod destination;

pub use destination::PostgresDestination;
