//! Outcome reporting.
//!
//! Records each per-record outcome into the entity summary and emits the
//! structured log events for it. The final summary line is what operators
//! read on stdout.

use clinic_migrator_shared::{MigrationOutcome, MigrationSummary, SkipReason};
use tracing::{debug, info};

/// Renders the per-entity summary line, e.g.
/// `anamneses: Inserted: 1, Skipped: 2, Failed: 0`.
pub fn summary_line(entity: &str, summary: &MigrationSummary, dry_run: bool) -> String {
    let prefix = if dry_run { "[dry run] " } else { "" };
    format!("{}{}: {}", prefix, entity, summary)
}

/// Accumulates outcomes for one entity run.
#[derive(Debug)]
pub struct OutcomeReporter {
    entity: &'static str,
    dry_run: bool,
    summary: MigrationSummary,
}

impl OutcomeReporter {
    pub fn new(entity: &'static str, dry_run: bool) -> Self {
        Self {
            entity,
            dry_run,
            summary: MigrationSummary::default(),
        }
    }

    pub fn record(&mut self, record_id: &str, outcome: &MigrationOutcome) {
        match outcome {
            MigrationOutcome::Inserted if self.dry_run => {
                debug!(entity = self.entity, record_id, "Would insert record")
            }
            MigrationOutcome::Inserted => debug!(entity = self.entity, record_id, "Inserted record"),
            MigrationOutcome::Skipped(SkipReason::MissingRequiredField(field)) => debug!(
                entity = self.entity,
                record_id,
                field = %field,
                "Skipped record: missing required field"
            ),
            MigrationOutcome::Skipped(reason) => {
                debug!(entity = self.entity, record_id, reason = %reason, "Skipped record")
            }
            // The runner already logged the error with its context.
            MigrationOutcome::Failed(_) => {}
        }
        self.summary.record(outcome);
    }

    pub fn summary(&self) -> &MigrationSummary {
        &self.summary
    }

    /// Logs the totals and hands back the summary.
    pub fn finish(self) -> MigrationSummary {
        info!(
            entity = self.entity,
            dry_run = self.dry_run,
            inserted = self.summary.inserted,
            skipped = self.summary.skipped,
            failed = self.summary.failed,
            "Entity migration finished"
        );
        self.summary
    }
}
