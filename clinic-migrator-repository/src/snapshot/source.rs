use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use clinic_migrator_shared::SourceRecord;
use serde_json::Value;
use tracing::info;

use crate::{SourceStore, SourceStoreError};

const ID_FIELDS: [&str; 2] = ["id", "_id"];

/// Source store backed by exported JSON files.
pub struct JsonSnapshotSource {
    dir: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl SourceStore for JsonSnapshotSource {
    async fn fetch_collection(
        &self,
        collection: &str,
    ) -> Result<Vec<SourceRecord>, SourceStoreError> {
        let path = self.collection_path(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceStoreError::collection_not_found(collection));
            }
            Err(e) => return Err(e.into()),
        };

        let document: Value = serde_json::from_slice(&bytes)?;
        let records = parse_snapshot(collection, document)?;
        info!(
            collection,
            path = %path.display(),
            records = records.len(),
            "Read snapshot collection"
        );
        Ok(records)
    }
}

pub(crate) fn parse_snapshot(
    collection: &str,
    document: Value,
) -> Result<Vec<SourceRecord>, SourceStoreError> {
    match document {
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let id = embedded_id(&item).unwrap_or_else(|| format!("{}#{}", collection, index));
                SourceRecord::from_value(id, item)
            })
            .collect()),
        Value::Object(entries) => Ok(entries
            .into_iter()
            .map(|(id, item)| SourceRecord::from_value(id, item))
            .collect()),
        other => Err(SourceStoreError::decode(format!(
            "snapshot for {} must be an array or object, found {}",
            collection,
            type_name(&other)
        ))),
    }
}

fn embedded_id(item: &Value) -> Option<String> {
    ID_FIELDS.iter().find_map(|field| match item.get(field)? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
