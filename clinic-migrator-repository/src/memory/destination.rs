use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use clinic_migrator_shared::{DestinationRecord, NaturalKey};

use crate::{DestinationStore, DestinationStoreError};

/// Destination store that keeps rows in memory, per table.
pub struct InMemoryDestination {
    tables: RwLock<HashMap<String, Vec<DestinationRecord>>>,
}

impl InMemoryDestination {
    /// Create a new empty destination.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Seed `table` with rows that already exist before the run.
    pub fn seed(&self, table: &str, records: Vec<DestinationRecord>) {
        self.tables
            .write()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .extend(records);
    }

    /// Snapshot of the rows currently stored in `table`.
    pub fn records(&self, table: &str) -> Vec<DestinationRecord> {
        self.tables
            .read()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of rows stored in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .read()
            .unwrap()
            .get(table)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Check if `table` holds no rows.
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

impl Default for InMemoryDestination {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DestinationStore for InMemoryDestination {
    async fn exists(&self, table: &str, key: &NaturalKey) -> Result<bool, DestinationStoreError> {
        if key.parts().is_empty() {
            return Err(DestinationStoreError::EmptyFilter(table.to_string()));
        }
        Ok(self
            .tables
            .read()
            .unwrap()
            .get(table)
            .is_some_and(|rows| rows.iter().any(|row| key.matches(row))))
    }

    async fn insert(
        &self,
        table: &str,
        record: &DestinationRecord,
    ) -> Result<(), DestinationStoreError> {
        self.tables
            .write()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }
}
