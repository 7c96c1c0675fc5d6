use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use clinic_migrator_shared::SourceRecord;

use crate::{SourceStore, SourceStoreError};

/// Source store that returns pre-registered collections.
pub struct InMemorySource {
    collections: RwLock<HashMap<String, Vec<SourceRecord>>>,
}

impl InMemorySource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Create a source holding a single collection.
    pub fn with_collection(collection: &str, records: Vec<SourceRecord>) -> Self {
        let source = Self::new();
        source.register_collection(collection, records);
        source
    }

    /// Register (or replace) the documents returned for `collection`.
    pub fn register_collection(&self, collection: &str, records: Vec<SourceRecord>) {
        self.collections
            .write()
            .unwrap()
            .insert(collection.to_string(), records);
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceStore for InMemorySource {
    async fn fetch_collection(
        &self,
        collection: &str,
    ) -> Result<Vec<SourceRecord>, SourceStoreError> {
        self.collections
            .read()
            .unwrap()
            .get(collection)
            .cloned()
            .ok_or_else(|| SourceStoreError::collection_not_found(collection))
    }
}
