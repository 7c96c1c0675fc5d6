use async_trait::async_trait;
use clinic_migrator_shared::{DestinationRecord, NaturalKey};

use crate::errors::DestinationStoreError;

/// Access to the destination relational store.
///
/// The migration only ever inserts new rows and skips on any existing match,
/// so no update or upsert primitive is part of this interface.
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Checks whether `table` holds a row whose columns equal every part of `key`.
    ///
    /// # Arguments
    ///
    /// * `table` - Destination table name
    /// * `key` - Natural key; every part becomes an equality predicate
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - At least one matching row exists
    /// * `Ok(false)` - No matching row
    /// * `Err(DestinationStoreError)` - If the lookup failed
    async fn exists(&self, table: &str, key: &NaturalKey) -> Result<bool, DestinationStoreError>;

    /// Inserts `record` as a new row of `table`.
    ///
    /// # Arguments
    ///
    /// * `table` - Destination table name
    /// * `record` - Mapped record; its fields become the column list
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The row was written
    /// * `Err(DestinationStoreError)` - Constraint violation, connectivity or encoding error
    async fn insert(
        &self,
        table: &str,
        record: &DestinationRecord,
    ) -> Result<(), DestinationStoreError>;
}
