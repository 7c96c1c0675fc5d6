use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DestinationRecord, FieldValue};

/// Ordered tuple of field values that identifies a logical entity.
///
/// Two records with equal natural keys are the same entity and must not both
/// be inserted. Matching is exact; there is no normalization beyond what the
/// field mapper already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalKey {
    parts: Vec<(String, FieldValue)>,
}

impl NaturalKey {
    pub fn new(parts: Vec<(String, FieldValue)>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[(String, FieldValue)] {
        &self.parts
    }

    /// `true` when `record` carries an equal value for every key field.
    pub fn matches(&self, record: &DestinationRecord) -> bool {
        self.parts
            .iter()
            .all(|(field, value)| record.get(field) == Some(value))
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, (field, value)) in self.parts.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", field, value)?;
        }
        write!(f, ")")
    }
}
