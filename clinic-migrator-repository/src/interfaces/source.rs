use async_trait::async_trait;
use clinic_migrator_shared::SourceRecord;

use crate::errors::SourceStoreError;

/// Read-only access to the source document store.
///
/// Implementations return the whole collection in one call. Paging, if the
/// backend needs it, happens inside the implementation; callers never see a
/// partial snapshot.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Enumerates every document of `collection`, in the store's iteration order.
    ///
    /// # Arguments
    ///
    /// * `collection` - Name of the source collection
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SourceRecord>)` - All documents of the collection (possibly empty)
    /// * `Err(SourceStoreError)` - If the snapshot could not be read in full
    async fn fetch_collection(&self, collection: &str)
        -> Result<Vec<SourceRecord>, SourceStoreError>;
}
