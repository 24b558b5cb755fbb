//! Dataroom CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use harveydrive_entity::dataroom::Dataroom;

use crate::dto::request::{CreateDataroomRequest, RenameRequest};
use crate::dto::response::{ApiResponse, DeletedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/datarooms
pub async fn list_datarooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Dataroom>>>, ApiError> {
    let datarooms = state.dataroom_service.list_datarooms(&auth).await?;
    Ok(Json(ApiResponse::ok(datarooms)))
}

/// POST /api/datarooms
pub async fn create_dataroom(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateDataroomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Dataroom>>), ApiError> {
    let dataroom = state
        .dataroom_service
        .create_dataroom(&auth, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(dataroom))))
}

/// GET /api/datarooms/{id}
pub async fn get_dataroom(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Dataroom>>, ApiError> {
    let dataroom = state.dataroom_service.get_dataroom(&auth, id).await?;
    Ok(Json(ApiResponse::ok(dataroom)))
}

/// PUT /api/datarooms/{id}
pub async fn rename_dataroom(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<ApiResponse<Dataroom>>, ApiError> {
    let dataroom = state
        .dataroom_service
        .rename_dataroom(&auth, id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(dataroom)))
}

/// DELETE /api/datarooms/{id}
pub async fn delete_dataroom(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.dataroom_service.delete_dataroom(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse::new(id))))
}
