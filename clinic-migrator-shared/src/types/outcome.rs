use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a record was not inserted without being an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// A required identifying field was blank after mapping.
    MissingRequiredField(String),
    /// A record with the same natural key is already stored.
    AlreadyExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRequiredField(_) => write!(f, "missing required field"),
            SkipReason::AlreadyExists => write!(f, "already exists"),
        }
    }
}

/// Result of migrating a single source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MigrationOutcome {
    Inserted,
    Skipped(SkipReason),
    /// The existence check or the insert failed; carries the rendered error.
    Failed(String),
}

/// Counters for one entity run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl MigrationSummary {
    pub fn record(&mut self, outcome: &MigrationOutcome) {
        match outcome {
            MigrationOutcome::Inserted => self.inserted += 1,
            MigrationOutcome::Skipped(_) => self.skipped += 1,
            MigrationOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Number of records accounted for.
    pub fn total(&self) -> usize {
        self.inserted + self.skipped + self.failed
    }
}

impl fmt::Display for MigrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inserted: {}, Skipped: {}, Failed: {}",
            self.inserted, self.skipped, self.failed
        )
    }
}
