//! Dependency initialization and wiring for the migrator.

use std::sync::Arc;

use clinic_migrator_repository::{DestinationStore, PostgresDestination, SourceStore};
use tracing::info;

use crate::adapter::EntityAdapter;
use crate::config::MigratorConfig;
use crate::errors::MigratorError;
use crate::runner::MigrationRunner;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured runner, shared by every entity run.
    pub runner: MigrationRunner,
    /// Adapters to run, in order.
    pub entities: Vec<&'static EntityAdapter>,
}

impl Dependencies {
    /// Connect the destination and build the source described by `config`.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(MigratorError)` - If the destination cannot be reached
    pub async fn new(config: MigratorConfig) -> Result<Self, MigratorError> {
        info!(
            source = %config.source.describe(),
            entities = ?config.entities.iter().map(|a| a.name).collect::<Vec<_>>(),
            dry_run = config.runner.dry_run,
            call_timeout_secs = config.runner.call_timeout.map(|t| t.as_secs()),
            "Initializing dependencies"
        );

        let destination = PostgresDestination::connect(&config.database_url).await?;
        info!("Destination connection established");

        Ok(Self::with_stores(
            config.source.clone().into_store(),
            Arc::new(destination),
            config,
        ))
    }

    /// Wire already-built stores, bypassing connection setup.
    pub fn with_stores(
        source: Arc<dyn SourceStore>,
        destination: Arc<dyn DestinationStore>,
        config: MigratorConfig,
    ) -> Self {
        Self {
            runner: MigrationRunner::new(source, destination, config.runner),
            entities: config.entities,
        }
    }
}
