//! # Clinic Migrator Shared
//!
//! This crate defines the data structures shared across the clinic migrator
//! ecosystem: loosely-typed source records, typed destination records,
//! natural keys, and the per-record outcomes aggregated into a run summary.

pub mod types;

pub use bigdecimal::BigDecimal;

pub use types::{
    DestinationRecord, FieldValue, MigrationOutcome, MigrationSummary, NaturalKey, SkipReason,
    SourceRecord,
};
