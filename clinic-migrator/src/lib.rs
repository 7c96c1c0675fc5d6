//! # Clinic Migrator
//!
//! One-shot, idempotent migration of clinic records from a Firestore document
//! store into PostgreSQL.
//!
//! ## Architecture
//!
//! Each record type is described by an [`adapter::EntityAdapter`]. The
//! [`runner::MigrationRunner`] drives one adapter at a time:
//!
//! 1. **Fetch**: bulk snapshot of the source collection
//! 2. **Map**: [`mapper::FieldMapper`] turns loose documents into typed records
//! 3. **Gate**: records missing a required field are skipped
//! 4. **Deduplicate**: [`deduplicator::Deduplicator`] checks the natural key
//! 5. **Insert**: new records are written one at a time
//! 6. **Report**: [`reporter::OutcomeReporter`] aggregates the outcomes
//!
//! Re-running the migration over unchanged source data inserts nothing new.
//! This only holds for one run at a time: the existence check and the insert
//! are not atomic, so two concurrent runs against the same destination can
//! both insert the same entity.
//!
//! Records without a date take the run date, and the date is part of every
//! natural key. Such a record is therefore only recognized as migrated when
//! the job is re-run on the same UTC day; a re-run on a later day inserts it
//! again.
//!
//! ## Modules
//!
//! - [`adapter`]: Entity adapters and field rules
//! - [`config`]: Environment settings and dependency wiring
//! - [`mapper`]: Field mapping and value coercion
//! - [`deduplicator`]: Natural-key existence checks
//! - [`runner`]: Per-entity migration flow
//! - [`reporter`]: Outcome counting and summary output
//! - [`errors`]: Error types for the migrator

pub mod adapter;
pub mod config;
mod deadline;
pub mod deduplicator;
pub mod errors;
pub mod mapper;
pub mod reporter;
pub mod runner;

pub use config::{Dependencies, MigratorConfig};
pub use errors::{MigratorError, RunnerError};
pub use runner::{MigrationRunner, RunnerConfig};
