//! Share handlers: per-user grants, public links and public downloads.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use uuid::Uuid;

use harveydrive_entity::file::File;
use harveydrive_entity::share::SharePermission;
use harveydrive_service::share::{CreateShareRequest as SvcCreateShare, SharedLink};

use crate::dto::request::CreateShareRequest;
use crate::dto::response::{ApiResponse, DeletedResponse, ShareResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::handlers::file::attachment;
use crate::state::AppState;

/// GET /api/files/{id}/shares
pub async fn list_file_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ShareResponse>>>, ApiError> {
    let shares = state.share_service.list_for_file(&auth, file_id).await?;
    let shares = shares.into_iter().map(ShareResponse::from).collect();
    Ok(Json(ApiResponse::ok(shares)))
}

/// POST /api/files/{id}/shares
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateShareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShareResponse>>), ApiError> {
    let share = state
        .share_service
        .create_share(
            &auth,
            file_id,
            SvcCreateShare {
                email: req.email,
                permission: req.permission.unwrap_or(SharePermission::View),
                expires_at: req.expires_at,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ShareResponse::from(share))),
    ))
}

/// GET /api/shares/with-me
pub async fn shared_with_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state.share_service.shared_with_me(&auth).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// DELETE /api/shares/{id}
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.share_service.revoke(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse::new(id))))
}

/// GET /api/s/{token} (public)
pub async fn open_public_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<SharedLink>>, ApiError> {
    let link = state.share_service.resolve_link(&token).await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// GET /api/s/{token}/download (public)
pub async fn download_public_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let (file, stream) = state.share_service.open_link(&token).await?;
    Ok(attachment(&file, stream)?)
}
