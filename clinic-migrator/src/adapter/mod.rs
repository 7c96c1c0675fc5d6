//! Entity adapters.
//!
//! An [`EntityAdapter`] is the static configuration that specializes the
//! generic migration engine for one record type: where to read, where to
//! write, how each destination field is mapped, which fields gate a record
//! and which fields form its natural key. Adding an entity means adding one
//! adapter module and registering it in [`ADAPTERS`].

mod anamneses;
mod appointments;
mod attendances;
mod budgets;

pub use anamneses::ANAMNESES;
pub use appointments::APPOINTMENTS;
pub use attendances::ATTENDANCES;
pub use budgets::BUDGETS;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use clinic_migrator_shared::{DestinationRecord, FieldValue};
use serde_json::{Map, Value};

/// Decimal places kept for [`FieldKind::Amount`] fields, matching the
/// `NUMERIC(12, 2)` money columns of the destination schema.
pub const AMOUNT_SCALE: i64 = 2;

/// Every adapter known to the migrator, in default run order.
pub static ADAPTERS: [&EntityAdapter; 4] = [&ANAMNESES, &APPOINTMENTS, &ATTENDANCES, &BUDGETS];

/// Target type a source value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// Money, rounded half-up to [`AMOUNT_SCALE`] decimals so the inserted
    /// value and the natural-key lookup agree with the stored column.
    Amount,
    /// ISO `YYYY-MM-DD`.
    Date,
    /// RFC 3339, UTC.
    Timestamp,
    /// JSON object or array.
    Json,
}

/// Value used when no alias yields a usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Fixed text, including enum values such as `"scheduled"`.
    Literal(&'static str),
    /// The run date.
    Today,
    /// The run instant.
    Now,
    /// `0`, or `0.00` for amounts.
    Zero,
    EmptyMap,
    EmptyList,
}

impl FieldDefault {
    pub fn resolve(&self, kind: FieldKind, now: DateTime<Utc>) -> FieldValue {
        match self {
            FieldDefault::Literal(text) => FieldValue::Text((*text).to_string()),
            FieldDefault::Today => FieldValue::Date(now.date_naive()),
            FieldDefault::Now => FieldValue::Timestamp(now),
            FieldDefault::Zero if kind == FieldKind::Amount => {
                FieldValue::Amount(BigDecimal::from(0).with_scale(AMOUNT_SCALE))
            }
            FieldDefault::Zero => FieldValue::Number(0.0),
            FieldDefault::EmptyMap => FieldValue::Json(Value::Object(Map::new())),
            FieldDefault::EmptyList => FieldValue::Json(Value::Array(Vec::new())),
        }
    }
}

/// Mapping rule for one destination field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Destination column name.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Source keys tried in order; the first present, non-blank one wins.
    pub aliases: &'static [&'static str],
    pub default: FieldDefault,
}

impl FieldRule {
    pub const fn new(
        name: &'static str,
        kind: FieldKind,
        aliases: &'static [&'static str],
        default: FieldDefault,
    ) -> Self {
        Self {
            name,
            kind,
            aliases,
            default,
        }
    }

    pub const fn text(
        name: &'static str,
        aliases: &'static [&'static str],
        default: FieldDefault,
    ) -> Self {
        Self::new(name, FieldKind::Text, aliases, default)
    }
}

/// Static configuration binding one source collection to one destination table.
#[derive(Debug)]
pub struct EntityAdapter {
    /// Name used in configuration, logs and summaries.
    pub name: &'static str,
    /// Source collection to snapshot.
    pub collection: &'static str,
    /// Destination table.
    pub table: &'static str,
    pub fields: &'static [FieldRule],
    /// Fields that must be non-blank after mapping for the record to be migrated.
    pub required: &'static [&'static str],
    /// Fields whose values identify the logical entity.
    pub natural_key: &'static [&'static str],
}

impl EntityAdapter {
    /// First required field that is absent or blank on `record`.
    pub fn missing_required(&self, record: &DestinationRecord) -> Option<&'static str> {
        self.required
            .iter()
            .copied()
            .find(|field| record.get(field).map_or(true, FieldValue::is_empty))
    }
}

/// Looks an adapter up by name, ignoring case and surrounding whitespace.
pub fn find(name: &str) -> Option<&'static EntityAdapter> {
    let name = name.trim();
    ADAPTERS
        .iter()
        .copied()
        .find(|adapter| adapter.name.eq_ignore_ascii_case(name))
}

/// Names of every registered adapter.
pub fn names() -> Vec<&'static str> {
    ADAPTERS.iter().map(|adapter| adapter.name).collect()
}
