//! Natural-key deduplicator.
//!
//! Exact match on the adapter's natural key is the idempotency mechanism of
//! the migration: the destination does not carry the source identifier, so a
//! record is recognized as already migrated when a row with equal values for
//! every natural-key field exists.

use std::time::Duration;

use clinic_migrator_repository::{DestinationStore, DestinationStoreError};
use clinic_migrator_shared::DestinationRecord;
use tracing::debug;

use crate::adapter::EntityAdapter;
use crate::deadline::with_deadline;

/// Result of an existence check.
#[derive(Debug)]
pub enum DuplicateCheck {
    NotFound,
    Found,
    /// The lookup itself failed; the record counts as failed, the run goes on.
    QueryFailed(DestinationStoreError),
}

pub struct Deduplicator<'a> {
    destination: &'a dyn DestinationStore,
    call_timeout: Option<Duration>,
}

impl<'a> Deduplicator<'a> {
    pub fn new(destination: &'a dyn DestinationStore, call_timeout: Option<Duration>) -> Self {
        Self {
            destination,
            call_timeout,
        }
    }

    /// Looks `record` up in `adapter.table` by its natural key.
    pub async fn check(&self, adapter: &EntityAdapter, record: &DestinationRecord) -> DuplicateCheck {
        let Some(key) = record.natural_key(adapter.natural_key) else {
            let missing = adapter
                .natural_key
                .iter()
                .find(|field| record.get(field).is_none())
                .copied()
                .unwrap_or_default();
            return DuplicateCheck::QueryFailed(DestinationStoreError::MissingKeyField(
                missing.to_string(),
            ));
        };

        let lookup = with_deadline(
            self.call_timeout,
            self.destination.exists(adapter.table, &key),
            DestinationStoreError::Timeout,
        )
        .await;

        match lookup {
            Ok(true) => {
                debug!(entity = adapter.name, key = %key, "Natural key already present");
                DuplicateCheck::Found
            }
            Ok(false) => DuplicateCheck::NotFound,
            Err(e) => DuplicateCheck::QueryFailed(e),
        }
    }
}
