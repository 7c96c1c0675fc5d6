use serde::{Deserialize, Serialize};

use crate::types::{FieldValue, NaturalKey};

/// A normalized record ready to be written to the destination store.
///
/// Fields keep the order the entity adapter declares them in, which is also
/// the column order used on insert. `source_id` identifies the document the
/// record was mapped from; it is used for logging and never written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub source_id: String,
    fields: Vec<(String, FieldValue)>,
}

impl DestinationRecord {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            fields: Vec::new(),
        }
    }

    /// Sets `name` to `value`, replacing an earlier value in place.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder-style variant of [`DestinationRecord::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Projects the record onto `key_fields`.
    ///
    /// Returns `None` when one of the key fields is not present on the record.
    pub fn natural_key<S: AsRef<str>>(&self, key_fields: &[S]) -> Option<NaturalKey> {
        let mut parts = Vec::with_capacity(key_fields.len());
        for field in key_fields {
            let field = field.as_ref();
            parts.push((field.to_string(), self.get(field)?.clone()));
        }
        Some(NaturalKey::new(parts))
    }
}
