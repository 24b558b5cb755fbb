//! File CRUD, upload, download, star, move and search handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;
use validator::Validate;

use harveydrive_core::error::AppError;
use harveydrive_core::traits::ByteStream;
use harveydrive_core::types::PageResponse;
use harveydrive_entity::file::File;
use harveydrive_service::file::{FileListQuery, SearchRequest, UploadParams};

use crate::dto::request::{FileListParams, MoveFileRequest, RenameRequest, SearchParams, StarRequest};
use crate::dto::response::{ApiResponse, DeletedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/files?folder_id=...&dataroom_id=...&page=...&per_page=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<FileListParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<File>>>, ApiError> {
    let page = state
        .file_service
        .list_files(
            &auth,
            FileListQuery {
                folder_id: params.folder_id,
                dataroom_id: params.dataroom_id,
            },
            pagination.into_page_request(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/files/starred
pub async fn list_starred(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state.file_service.list_starred(&auth).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/files/search?q=...&dataroom_id=...&folder_id=...
pub async fn search_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    params.validate()?;
    let files = state
        .search_service
        .search(
            &auth,
            SearchRequest {
                query: params.q,
                dataroom_id: params.dataroom_id,
                folder_id: params.folder_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /api/files/upload (multipart: `file`, optional `folder_id`, `dataroom_id`)
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    let mut folder_id: Option<Uuid> = None;
    let mut dataroom_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" => folder_id = parse_optional_id(&field.text().await?, "folder_id")?,
            "dataroom_id" => dataroom_id = parse_optional_id(&field.text().await?, "dataroom_id")?,
            "file" => {
                file_name = field.file_name().map(String::from);
                mime_type = field.content_type().map(String::from);
                data = Some(field.bytes().await?);
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("file is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;

    let file = state
        .upload_service
        .upload(
            &auth,
            UploadParams {
                folder_id,
                dataroom_id,
                file_name,
                mime_type,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.get_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let (file, stream) = state.file_service.download(&auth, id).await?;
    Ok(attachment(&file, stream)?)
}

/// PUT /api/files/{id}
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.rename_file(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}/star
pub async fn star_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<StarRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.set_starred(&auth, id, req.starred).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}/move
pub async fn move_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<MoveFileRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.move_file(&auth, id, req.folder_id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse::new(id))))
}

/// Streams a file's bytes as a download.
pub(crate) fn attachment(file: &File, stream: ByteStream) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.mime_type.as_str())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", header_safe_name(&file.name)),
        )
        .header(header::CONTENT_LENGTH, file.size)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// A multipart text field holding an optional UUID; blank means none.
fn parse_optional_id(text: &str, field: &str) -> Result<Option<Uuid>, AppError> {
    let text = text.trim();
    if text.is_empty() || text == "null" {
        return Ok(None);
    }
    Uuid::parse_str(text)
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid {field}")))
}

/// File name usable inside a quoted `Content-Disposition` parameter.
fn header_safe_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
