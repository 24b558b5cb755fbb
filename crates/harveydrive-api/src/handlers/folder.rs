//! Folder CRUD, move and breadcrumb handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use harveydrive_entity::folder::{Folder, FolderCrumb};
use harveydrive_service::folder::{
    CreateFolderRequest as SvcCreateFolder, FolderListQuery,
};

use crate::dto::request::{CreateFolderRequest, FolderListParams, MoveFolderRequest, RenameRequest};
use crate::dto::response::{ApiResponse, DeletedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/folders?parent_id=...&dataroom_id=...
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<FolderListParams>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state
        .folder_service
        .list_folders(
            &auth,
            FolderListQuery {
                parent_id: params.parent_id,
                dataroom_id: params.dataroom_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
                dataroom_id: req.dataroom_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.folder_service.rename_folder(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<MoveFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state
        .folder_service
        .move_folder(&auth, id, req.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /api/folders/{id}/path
pub async fn get_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<FolderCrumb>>>, ApiError> {
    let path = state.folder_service.get_path(&auth, id).await?;
    Ok(Json(ApiResponse::ok(path)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse::new(id))))
}
