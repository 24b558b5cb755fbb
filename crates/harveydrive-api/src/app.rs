//! Application builder: wires repositories, services and the router into an Axum app.

use std::sync::Arc;

use axum::Router;
use tracing::{error, info};

use harveydrive_core::config::AppConfig;
use harveydrive_core::error::AppError;
use harveydrive_core::traits::BlobStore;
use harveydrive_database::DatabasePool;
use harveydrive_database::repositories::{
    DataroomRepository, FileRepository, FolderRepository, ProfileRepository, ShareRepository,
};
use harveydrive_service::{
    DataroomService, FileService, FolderService, ProfileService, SearchService, ShareService,
    UploadService,
};

use crate::auth::TokenVerifier;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state from configuration, a database pool and a blob store.
pub fn build_state(config: AppConfig, db: DatabasePool, blobs: Arc<dyn BlobStore>) -> AppState {
    let pool = db.pool().clone();

    let dataroom_repo = Arc::new(DataroomRepository::new(pool.clone()));
    let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
    let file_repo = Arc::new(FileRepository::new(pool.clone()));
    let share_repo = Arc::new(ShareRepository::new(pool.clone()));
    let profile_repo = Arc::new(ProfileRepository::new(pool));

    let profile_service = Arc::new(ProfileService::new(Arc::clone(&profile_repo)));
    let dataroom_service = Arc::new(DataroomService::new(
        Arc::clone(&dataroom_repo),
        Arc::clone(&file_repo),
        Arc::clone(&blobs),
    ));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
        Arc::clone(&dataroom_repo),
        Arc::clone(&blobs),
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&share_repo),
        Arc::clone(&blobs),
    ));
    let upload_service = Arc::new(UploadService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&dataroom_repo),
        Arc::clone(&blobs),
        config.storage.clone(),
    ));
    let search_service = Arc::new(SearchService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&dataroom_repo),
    ));
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&file_repo),
        Arc::clone(&profile_repo),
        Arc::clone(&blobs),
    ));

    AppState {
        verifier: Arc::new(TokenVerifier::new(&config.auth)),
        config: Arc::new(config),
        db,
        blobs,
        profile_service,
        dataroom_service,
        folder_service,
        file_service,
        upload_service,
        search_service,
        share_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serves the application until Ctrl+C or SIGTERM.
pub async fn run_server(
    config: AppConfig,
    db: DatabasePool,
    blobs: Arc<dyn BlobStore>,
) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(build_state(config, db.clone(), blobs));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "HarveyDrive listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Closing database pool");
    db.close().await;
    info!("HarveyDrive shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
