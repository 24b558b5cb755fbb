//! Route definitions for the HarveyDrive HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Multipart framing allowance on top of the configured upload size.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.storage.max_upload_size_bytes as usize + MULTIPART_OVERHEAD_BYTES;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(profile_routes())
        .merge(dataroom_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(share_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Liveness and readiness checks (no auth)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::readiness))
}

/// Caller profile
fn profile_routes() -> Router<AppState> {
    Router::new().route("/me", get(handlers::profile::me))
}

/// Dataroom CRUD
fn dataroom_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/datarooms",
            get(handlers::dataroom::list_datarooms).post(handlers::dataroom::create_dataroom),
        )
        .route(
            "/datarooms/{id}",
            get(handlers::dataroom::get_dataroom)
                .put(handlers::dataroom::rename_dataroom)
                .delete(handlers::dataroom::delete_dataroom),
        )
}

/// Folder CRUD, move, breadcrumbs
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::rename_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
        .route("/folders/{id}/path", get(handlers::folder::get_path))
}

/// File CRUD, upload, download, star, move, search, per-file shares
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files/starred", get(handlers::file::list_starred))
        .route("/files/search", get(handlers::file::search_files))
        .route(
            "/files/{id}",
            get(handlers::file::get_file)
                .put(handlers::file::rename_file)
                .delete(handlers::file::delete_file),
        )
        .route("/files/{id}/download", get(handlers::file::download_file))
        .route("/files/{id}/star", put(handlers::file::star_file))
        .route("/files/{id}/move", put(handlers::file::move_file))
        .route(
            "/files/{id}/shares",
            get(handlers::share::list_file_shares).post(handlers::share::create_share),
        )
}

/// Shares and public links (public link routes need no auth)
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares/with-me", get(handlers::share::shared_with_me))
        .route("/shares/{id}", delete(handlers::share::revoke_share))
        .route("/s/{token}", get(handlers::share::open_public_link))
        .route(
            "/s/{token}/download",
            get(handlers::share::download_public_link),
        )
}
