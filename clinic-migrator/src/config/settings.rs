//! Environment-driven settings for a migration run.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clinic_migrator_repository::SourceConfig;

use crate::adapter::{self, EntityAdapter, ADAPTERS};
use crate::errors::MigratorError;
use crate::runner::RunnerConfig;

/// Default Firestore REST endpoint.
const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Default Firestore database id.
const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";

/// Everything a run needs, resolved from the environment.
#[derive(Debug, Clone)]
pub struct MigratorConfig {
    pub database_url: String,
    pub source: SourceConfig,
    /// Adapters to run, in run order, without duplicates.
    pub entities: Vec<&'static EntityAdapter>,
    pub runner: RunnerConfig,
}

impl MigratorConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: destination PostgreSQL URL (required)
    /// - `SOURCE_SNAPSHOT_DIR`: read `<dir>/<collection>.json` exports instead of Firestore
    /// - `FIRESTORE_PROJECT_ID`: Firestore project (required without a snapshot dir)
    /// - `FIRESTORE_DATABASE`: database id (default: "(default)")
    /// - `FIRESTORE_BASE_URL`: REST endpoint (default: https://firestore.googleapis.com/v1)
    /// - `FIRESTORE_ACCESS_TOKEN`: bearer token
    /// - `MIGRATION_ENTITIES`: comma-separated adapter names (default: all)
    /// - `MIGRATION_DRY_RUN`: "true", "1" or "yes" to skip inserts
    /// - `MIGRATION_CALL_TIMEOUT_SECS`: per store call deadline
    pub fn from_env() -> Result<Self, MigratorError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`MigratorConfig::from_env`] with an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MigratorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url =
            var("DATABASE_URL").ok_or_else(|| MigratorError::config("DATABASE_URL must be set"))?;

        let source = match var("SOURCE_SNAPSHOT_DIR") {
            Some(dir) => SourceConfig::Snapshot {
                dir: PathBuf::from(dir),
            },
            None => SourceConfig::Firestore {
                base_url: var("FIRESTORE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.to_string()),
                project_id: var("FIRESTORE_PROJECT_ID").ok_or_else(|| {
                    MigratorError::config(
                        "FIRESTORE_PROJECT_ID or SOURCE_SNAPSHOT_DIR must be set",
                    )
                })?,
                database: var("FIRESTORE_DATABASE")
                    .unwrap_or_else(|| DEFAULT_FIRESTORE_DATABASE.to_string()),
                access_token: var("FIRESTORE_ACCESS_TOKEN"),
            },
        };

        let entities = match var("MIGRATION_ENTITIES") {
            Some(list) => parse_entities(&list)?,
            None => ADAPTERS.to_vec(),
        };

        let dry_run = var("MIGRATION_DRY_RUN")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let call_timeout = match var("MIGRATION_CALL_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(MigratorError::config(format!(
                        "MIGRATION_CALL_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
                Ok(secs) => Some(Duration::from_secs(secs)),
            },
            None => None,
        };

        Ok(Self {
            database_url,
            source,
            entities,
            runner: RunnerConfig {
                dry_run,
                call_timeout,
            },
        })
    }
}

fn parse_entities(list: &str) -> Result<Vec<&'static EntityAdapter>, MigratorError> {
    let mut entities: Vec<&'static EntityAdapter> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let found = adapter::find(name).ok_or_else(|| MigratorError::unknown_entity(name))?;
        if !entities.iter().any(|known| known.name == found.name) {
            entities.push(found);
        }
    }
    if entities.is_empty() {
        return Err(MigratorError::config("MIGRATION_ENTITIES names no entity"));
    }
    Ok(entities)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
