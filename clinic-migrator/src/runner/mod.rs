//! Migration runner.
//!
//! Drives one entity adapter end to end: bulk fetch from the source, then for
//! each record map, gate on required fields, deduplicate by natural key and
//! insert. Records are processed strictly one after another, so a record
//! inserted earlier in the run is visible to the existence check of every
//! later record.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clinic_migrator_repository::{
    DestinationStore, DestinationStoreError, SourceStore, SourceStoreError,
};
use clinic_migrator_shared::{DestinationRecord, MigrationOutcome, MigrationSummary, SkipReason};
use tracing::{info, instrument, warn};

use crate::adapter::EntityAdapter;
use crate::deadline::with_deadline;
use crate::deduplicator::{Deduplicator, DuplicateCheck};
use crate::errors::RunnerError;
use crate::mapper::FieldMapper;
use crate::reporter::OutcomeReporter;

/// Configuration for the runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerConfig {
    /// Run every check but perform no inserts.
    pub dry_run: bool,
    /// Upper bound for each store call. `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
}

pub struct MigrationRunner {
    source: Arc<dyn SourceStore>,
    destination: Arc<dyn DestinationStore>,
    config: RunnerConfig,
}

impl MigrationRunner {
    pub fn new(
        source: Arc<dyn SourceStore>,
        destination: Arc<dyn DestinationStore>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            source,
            destination,
            config,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Migrates every record of `adapter.collection` into `adapter.table`.
    pub async fn run(&self, adapter: &'static EntityAdapter) -> Result<MigrationSummary, RunnerError> {
        self.run_at(adapter, Utc::now()).await
    }

    /// Same as [`MigrationRunner::run`] with an explicit reference instant for
    /// date and timestamp defaults.
    #[instrument(skip(self, adapter, now), fields(entity = adapter.name))]
    pub async fn run_at(
        &self,
        adapter: &'static EntityAdapter,
        now: DateTime<Utc>,
    ) -> Result<MigrationSummary, RunnerError> {
        let records = with_deadline(
            self.config.call_timeout,
            self.source.fetch_collection(adapter.collection),
            SourceStoreError::Timeout,
        )
        .await
        .map_err(|e| RunnerError::fetch(adapter.name, e))?;

        info!(
            entity = adapter.name,
            collection = adapter.collection,
            records = records.len(),
            dry_run = self.config.dry_run,
            "Fetched source snapshot"
        );

        let mapper = FieldMapper::new(now);
        let deduplicator = Deduplicator::new(self.destination.as_ref(), self.config.call_timeout);
        let mut reporter = OutcomeReporter::new(adapter.name, self.config.dry_run);

        for source_record in &records {
            let record = mapper.map(adapter, source_record);
            let outcome = self.migrate_record(adapter, &deduplicator, &record).await;
            reporter.record(&source_record.id, &outcome);
        }

        Ok(reporter.finish())
    }

    async fn migrate_record(
        &self,
        adapter: &EntityAdapter,
        deduplicator: &Deduplicator<'_>,
        record: &DestinationRecord,
    ) -> MigrationOutcome {
        if let Some(field) = adapter.missing_required(record) {
            return MigrationOutcome::Skipped(SkipReason::MissingRequiredField(field.to_string()));
        }

        match deduplicator.check(adapter, record).await {
            DuplicateCheck::Found => return MigrationOutcome::Skipped(SkipReason::AlreadyExists),
            DuplicateCheck::QueryFailed(e) => {
                warn!(
                    entity = adapter.name,
                    record_id = %record.source_id,
                    error = %e,
                    "Existence check failed"
                );
                return MigrationOutcome::Failed(e.to_string());
            }
            DuplicateCheck::NotFound => {}
        }

        if self.config.dry_run {
            return MigrationOutcome::Inserted;
        }

        let inserted = with_deadline(
            self.config.call_timeout,
            self.destination.insert(adapter.table, record),
            DestinationStoreError::Timeout,
        )
        .await;

        match inserted {
            Ok(()) => MigrationOutcome::Inserted,
            Err(e) => {
                warn!(
                    entity = adapter.name,
                    record_id = %record.source_id,
                    error = %e,
                    "Insert failed"
                );
                MigrationOutcome::Failed(e.to_string())
            }
        }
    }
}
