use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document read from the source store.
///
/// The field mapping is kept exactly as the store returned it: no schema is
/// assumed, any field may be missing, `null`, or of an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl SourceRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a record from any JSON value. Non-object values yield a record
    /// with no fields.
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    /// Returns the raw value stored under `key`, treating JSON `null` as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }
}
