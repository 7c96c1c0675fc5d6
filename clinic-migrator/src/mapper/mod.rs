//! Field mapper.
//!
//! Turns a loosely-typed [`SourceRecord`] into a [`DestinationRecord`] using
//! the rules of an [`EntityAdapter`]. For each destination field the first
//! present, non-blank alias is coerced to the field kind; when no alias is
//! present, or the value found cannot be coerced, the field default applies.
//! Mapping never fails.

pub mod coerce;

use chrono::{DateTime, Utc};
use clinic_migrator_shared::{DestinationRecord, FieldValue, SourceRecord};
use serde_json::Value;

use crate::adapter::{EntityAdapter, FieldKind, FieldRule, AMOUNT_SCALE};

/// Pure mapper bound to the reference instant of a run.
///
/// `Today` and `Now` defaults resolve against `now`, so every record of one
/// run gets the same date.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper {
    now: DateTime<Utc>,
}

impl FieldMapper {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Maps `record` onto every field `adapter` declares, in declaration order.
    pub fn map(&self, adapter: &EntityAdapter, record: &SourceRecord) -> DestinationRecord {
        let mut mapped = DestinationRecord::new(record.id.clone());
        for rule in adapter.fields {
            mapped.set(rule.name, self.map_field(rule, record));
        }
        mapped
    }

    fn map_field(&self, rule: &FieldRule, record: &SourceRecord) -> FieldValue {
        rule.aliases
            .iter()
            .filter_map(|alias| record.get(alias))
            .find(|value| !is_blank(value))
            .and_then(|value| coerce(rule.kind, value))
            .unwrap_or_else(|| rule.default.resolve(rule.kind, self.now))
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.trim().is_empty())
}

fn coerce(kind: FieldKind, value: &Value) -> Option<FieldValue> {
    match kind {
        FieldKind::Text => coerce::to_text(value).map(FieldValue::Text),
        FieldKind::Number => coerce::to_number(value).map(FieldValue::Number),
        FieldKind::Amount => coerce::to_amount(value, AMOUNT_SCALE).map(FieldValue::Amount),
        FieldKind::Date => coerce::to_date(value).map(FieldValue::Date),
        FieldKind::Timestamp => coerce::to_timestamp(value).map(FieldValue::Timestamp),
        FieldKind::Json => coerce::to_json(value).map(FieldValue::Json),
    }
}
