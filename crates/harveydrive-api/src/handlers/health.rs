//! Liveness and readiness handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use harveydrive_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse, ReadinessResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/ready
///
/// 200 when both the database and the blob store answer, 503 with the
/// per-dependency report otherwise.
pub async fn readiness(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReadinessResponse>>, ApiError> {
    let database_ok = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Readiness: database unreachable");
            false
        }
    };
    let storage_ok = match state.blobs.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            warn!(error = %e, "Readiness: blob store check failed");
            false
        }
    };

    let report = ReadinessResponse {
        status: if database_ok && storage_ok { "ready" } else { "not_ready" }.to_string(),
        database: if database_ok { "connected" } else { "unreachable" }.to_string(),
        storage: if storage_ok { "available" } else { "unavailable" }.to_string(),
        storage_provider: state.blobs.provider_type().to_string(),
    };

    if !(database_ok && storage_ok) {
        let details = serde_json::to_value(&report).map_err(AppError::from)?;
        return Err(AppError::service_unavailable("Service is not ready")
            .with_details(details)
            .into());
    }

    Ok(Json(ApiResponse::ok(report)))
}
