//! Caller profile handler.

use axum::Json;
use axum::extract::State;

use harveydrive_entity::profile::Profile;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.profile_service.sync(&auth).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
