mod destination_record;
mod field_value;
mod natural_key;
mod outcome;
mod source_record;

pub use destination_record::DestinationRecord;
pub use field_value::FieldValue;
pub use natural_key::NaturalKey;
pub use outcome::{MigrationOutcome, MigrationSummary, SkipReason};
pub use source_record::SourceRecord;
