//! Clinic Migrator Main Entry Point
//!
//! Migrates every configured entity in order and prints one summary line per
//! entity to stdout. Logs go to stderr.

use clinic_migrator::reporter::summary_line;
use clinic_migrator::{Dependencies, MigratorConfig, MigratorError};
use dotenv::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("clinic_migrator=info,clinic_migrator_repository=info")
    });

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    info!(
        service_name = "clinic-migrator",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), MigratorError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting clinic records migration");

    let config = match MigratorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e);
        }
    };
    let dry_run = config.runner.dry_run;

    let deps = match Dependencies::new(config).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    for adapter in deps.entities.iter().copied() {
        match deps.runner.run(adapter).await {
            Ok(summary) => println!("{}", summary_line(adapter.name, &summary, dry_run)),
            Err(e) => {
                error!(entity = adapter.name, error = %e, "Migration aborted");
                return Err(e.into());
            }
        }
    }

    info!("Migration completed");
    Ok(())
}
