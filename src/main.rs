//! HarveyDrive server: datarooms, folders, files and sharing.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use harveydrive_core::config::AppConfig;
use harveydrive_core::error::AppError;
use harveydrive_core::traits::BlobStore;
use harveydrive_database::DatabasePool;
use harveydrive_database::migration::run_migrations;
use harveydrive_storage::LocalBlobStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("HARVEYDRIVE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting HarveyDrive v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    let blobs: Arc<dyn BlobStore> = Arc::new(
        LocalBlobStore::new(&config.storage.root_path, &config.storage.public_base_url).await?,
    );
    tracing::info!(
        provider = blobs.provider_type(),
        root = %config.storage.root_path,
        "Blob store ready"
    );

    harveydrive_api::run_server(config, db, blobs).await
}
