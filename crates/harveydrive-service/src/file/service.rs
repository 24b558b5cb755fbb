//! File CRUD operations with auto-suffix naming.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use harveydrive_core::error::AppError;
use harveydrive_core::traits::{BlobStore, ByteStream};
use harveydrive_core::types::{PageRequest, PageResponse};
use harveydrive_database::repositories::{FileRepository, FolderRepository, ShareRepository};
use harveydrive_entity::file::File;

use crate::blob_cleanup::purge_blobs;
use crate::context::RequestContext;
use crate::naming::{normalize_name, retry_on_conflict, unique_file_name};

/// Manages file CRUD operations.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Share repository, for recipient access.
    share_repo: Arc<ShareRepository>,
    /// Blob store holding file bytes.
    blobs: Arc<dyn BlobStore>,
}

/// Which files to list.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct FileListQuery {
    /// Folder to list; `None` lists the top level.
    pub folder_id: Option<Uuid>,
    /// Dataroom whose top level to list.
    pub dataroom_id: Option<Uuid>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        share_repo: Arc<ShareRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            share_repo,
            blobs,
        }
    }

    /// Lists files in a folder, or at a dataroom's top level.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        query: FileListQuery,
        page: PageRequest,
    ) -> Result<PageResponse<File>, AppError> {
        if let Some(folder_id) = query.folder_id {
            self.folder_repo
                .find_by_id(folder_id, ctx.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }
        self.file_repo
            .find_by_folder(ctx.user_id, query.folder_id, query.dataroom_id, &page)
            .await
    }

    /// Lists the caller's starred files.
    pub async fn list_starred(&self, ctx: &RequestContext) -> Result<Vec<File>, AppError> {
        self.file_repo.find_starred(ctx.user_id).await
    }

    /// Gets a file owned by the caller or shared with them.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        if let Some(file) = self.file_repo.find_owned(file_id, ctx.user_id).await? {
            return Ok(file);
        }
        if self
            .share_repo
            .find_active_for_user(file_id, ctx.user_id)
            .await?
            .is_some()
        {
            if let Some(file) = self.file_repo.find_by_id(file_id).await? {
                return Ok(file);
            }
        }
        Err(AppError::not_found("File not found"))
    }

    /// Gets a file owned by the caller.
    pub async fn get_owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        self.file_repo
            .find_owned(file_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Opens the bytes of an accessible file for streaming.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<(File, ByteStream), AppError> {
        let file = self.get_file(ctx, file_id).await?;
        let stream = self.blobs.get(&file.blob_key).await?;
        Ok((file, stream))
    }

    /// Renames a file, suffixing the name if a sibling already uses it.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> Result<File, AppError> {
        let name = normalize_name(new_name, "File")?;
        let file = self.get_owned_file(ctx, file_id).await?;

        let renamed = retry_on_conflict(|| self.try_place(&file, file.folder_id, file.dataroom_id, &name))
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            old_name = %file.name,
            new_name = %renamed.name,
            "File renamed"
        );

        Ok(renamed)
    }

    /// Moves a file into a folder (or the top level of its dataroom).
    pub async fn move_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        target_folder_id: Option<Uuid>,
    ) -> Result<File, AppError> {
        let file = self.get_owned_file(ctx, file_id).await?;
        if file.folder_id == target_folder_id {
            return Ok(file);
        }

        let dataroom_id = match target_folder_id {
            Some(folder_id) => {
                self.folder_repo
                    .find_by_id(folder_id, ctx.user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Target folder not found"))?
                    .dataroom_id
            }
            None => file.dataroom_id,
        };

        let moved = retry_on_conflict(|| self.try_place(&file, target_folder_id, dataroom_id, &file.name))
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            from = ?file.folder_id,
            to = ?target_folder_id,
            name = %moved.name,
            "File moved"
        );

        Ok(moved)
    }

    /// Stars or unstars a file.
    pub async fn set_starred(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        starred: bool,
    ) -> Result<File, AppError> {
        let file = self.file_repo.set_starred(file_id, ctx.user_id, starred).await?;
        info!(user_id = %ctx.user_id, file_id = %file_id, starred, "File star toggled");
        Ok(file)
    }

    /// Deletes a file's record, then its bytes.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        let file = self.get_owned_file(ctx, file_id).await?;

        if !self.file_repo.delete(file_id, ctx.user_id).await? {
            return Err(AppError::not_found("File not found"));
        }
        purge_blobs(self.blobs.as_ref(), std::slice::from_ref(&file.blob_key)).await;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            name = %file.name,
            "File deleted"
        );

        Ok(())
    }

    /// Resolve a free name for `file` in `folder_id` and write the new placement.
    async fn try_place(
        &self,
        file: &File,
        folder_id: Option<Uuid>,
        dataroom_id: Option<Uuid>,
        candidate: &str,
    ) -> Result<File, AppError> {
        let mut existing: HashSet<String> = self
            .file_repo
            .find_names_in_folder(file.owner_id, folder_id)
            .await?
            .into_iter()
            .collect();
        if folder_id == file.folder_id {
            existing.remove(&file.name);
        }
        let name = unique_file_name(candidate, &existing);

        if folder_id == file.folder_id {
            self.file_repo.rename(file.id, file.owner_id, &name).await
        } else {
            self.file_repo
                .move_to(file.id, file.owner_id, folder_id, dataroom_id, &name)
                .await
        }
    }
}
