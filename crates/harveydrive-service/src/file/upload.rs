//! Single-request file upload.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use harveydrive_core::config::StorageConfig;
use harveydrive_core::error::AppError;
use harveydrive_core::traits::{BlobStore, StoredBlob};
use harveydrive_database::repositories::{DataroomRepository, FileRepository, FolderRepository};
use harveydrive_entity::file::{CreateFile, File};
use harveydrive_storage::blob_key;

use crate::blob_cleanup::purge_blobs;
use crate::context::RequestContext;
use crate::file::mime::mime_from_name;
use crate::folder::service::ensure_same_dataroom;
use crate::naming::{normalize_name, retry_on_conflict, unique_file_name};

/// Handles file uploads.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Dataroom repository.
    dataroom_repo: Arc<DataroomRepository>,
    /// Blob store holding file bytes.
    blobs: Arc<dyn BlobStore>,
    /// Storage configuration.
    config: StorageConfig,
}

/// Upload parameters (single request with full file body).
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Target folder ID (None for the top level).
    pub folder_id: Option<Uuid>,
    /// Target dataroom; inherited from the folder when one is given.
    pub dataroom_id: Option<Uuid>,
    /// File name as supplied by the client.
    pub file_name: String,
    /// MIME type declared by the client.
    pub mime_type: Option<String>,
    /// File content bytes.
    pub data: Bytes,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        dataroom_repo: Arc<DataroomRepository>,
        blobs: Arc<dyn BlobStore>,
        config: StorageConfig,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            dataroom_repo,
            blobs,
            config,
        }
    }

    /// Stores the bytes and records the file under a unique name.
    pub async fn upload(&self, ctx: &RequestContext, params: UploadParams) -> Result<File, AppError> {
        if params.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }
        let original_name = normalize_name(&params.file_name, "File")?;

        let dataroom_id = match params.folder_id {
            Some(folder_id) => {
                let folder = self
                    .folder_repo
                    .find_by_id(folder_id, ctx.user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Target folder not found"))?;
                ensure_same_dataroom(&folder, params.dataroom_id)?;
                folder.dataroom_id
            }
            None => {
                if let Some(dataroom_id) = params.dataroom_id {
                    self.dataroom_repo
                        .find_by_id(dataroom_id, ctx.user_id)
                        .await?
                        .ok_or_else(|| AppError::not_found("Dataroom not found"))?;
                }
                params.dataroom_id
            }
        };

        let mime_type = params
            .mime_type
            .filter(|m| !m.trim().is_empty() && m != "application/octet-stream")
            .unwrap_or_else(|| mime_from_name(&original_name).to_string());

        let key = blob_key(ctx.user_id, &original_name);
        let stored = self.blobs.put(&key, params.data).await?;

        let target = Target {
            owner_id: ctx.user_id,
            folder_id: params.folder_id,
            dataroom_id,
        };
        let result = retry_on_conflict(|| {
            self.try_record(&target, &original_name, &mime_type, &stored)
        })
        .await;

        let file = match result {
            Ok(file) => file,
            Err(err) => {
                purge_blobs(self.blobs.as_ref(), std::slice::from_ref(&stored.key)).await;
                return Err(err);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            name = %file.name,
            size = file.size,
            "File uploaded"
        );

        Ok(file)
    }

    async fn try_record(
        &self,
        target: &Target,
        original_name: &str,
        mime_type: &str,
        stored: &StoredBlob,
    ) -> Result<File, AppError> {
        let existing: HashSet<String> = self
            .file_repo
            .find_names_in_folder(target.owner_id, target.folder_id)
            .await?
            .into_iter()
            .collect();

        let data = CreateFile {
            owner_id: target.owner_id,
            folder_id: target.folder_id,
            dataroom_id: target.dataroom_id,
            name: unique_file_name(original_name, &existing),
            original_name: original_name.to_string(),
            size: stored.size_bytes as i64,
            mime_type: mime_type.to_string(),
            blob_url: stored.url.clone(),
            blob_key: stored.key.clone(),
        };
        self.file_repo.create(&data).await
    }
}

/// Where an uploaded file lands.
#[derive(Debug, Clone, Copy)]
struct Target {
    owner_id: Uuid,
    folder_id: Option<Uuid>,
    dataroom_id: Option<Uuid>,
}
