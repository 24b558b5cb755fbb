//! Folder CRUD operations with reject-on-conflict naming.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use harveydrive_core::error::AppError;
use harveydrive_core::traits::BlobStore;
use harveydrive_database::repositories::{DataroomRepository, FileRepository, FolderRepository};
use harveydrive_entity::folder::{CreateFolder, Folder, FolderCrumb, FolderScope};

use crate::blob_cleanup::purge_blobs;
use crate::context::RequestContext;
use crate::folder::ancestry::{MAX_BREADCRUMB_DEPTH, ensure_valid_destination, resolve_ancestry};
use crate::folder::descendants::collect_descendants;
use crate::naming::{ensure_name_available, normalize_name};

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository, for blob cleanup on delete.
    file_repo: Arc<FileRepository>,
    /// Dataroom repository, for ownership checks.
    dataroom_repo: Arc<DataroomRepository>,
    /// Blob store holding file bytes.
    blobs: Arc<dyn BlobStore>,
}

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for dataroom root level).
    pub parent_id: Option<Uuid>,
    /// Dataroom ID; inherited from the parent when one is given.
    pub dataroom_id: Option<Uuid>,
}

/// Which level of the hierarchy to list.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct FolderListQuery {
    /// Parent folder; `None` lists the root level.
    pub parent_id: Option<Uuid>,
    /// Dataroom whose root level to list.
    pub dataroom_id: Option<Uuid>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        dataroom_repo: Arc<DataroomRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            dataroom_repo,
            blobs,
        }
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<Folder, AppError> {
        self.folder_repo
            .find_by_id(folder_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Lists the folders directly below a parent, or at a dataroom's root.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        query: FolderListQuery,
    ) -> Result<Vec<Folder>, AppError> {
        let scope = match query.parent_id {
            Some(parent_id) => {
                let parent = self.get_folder(ctx, parent_id).await?;
                FolderScope {
                    owner_id: ctx.user_id,
                    parent_id: Some(parent.id),
                    dataroom_id: parent.dataroom_id,
                }
            }
            None => FolderScope {
                owner_id: ctx.user_id,
                parent_id: None,
                dataroom_id: query.dataroom_id,
            },
        };
        self.folder_repo.find_children(&scope).await
    }

    /// Creates a new folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        let name = normalize_name(&req.name, "Folder")?;

        let dataroom_id = match req.parent_id {
            Some(parent_id) => {
                let parent = self.get_folder(ctx, parent_id).await?;
                ensure_same_dataroom(&parent, req.dataroom_id)?;
                parent.dataroom_id
            }
            None => {
                if let Some(dataroom_id) = req.dataroom_id {
                    self.require_dataroom(ctx, dataroom_id).await?;
                }
                req.dataroom_id
            }
        };

        let data = CreateFolder {
            owner_id: ctx.user_id,
            parent_id: req.parent_id,
            dataroom_id,
            name,
        };
        ensure_name_available(self.folder_repo.as_ref(), &data.scope(), &data.name, None).await?;

        let folder = self.folder_repo.create(&data).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> Result<Folder, AppError> {
        let name = normalize_name(new_name, "Folder")?;
        let folder = self.get_folder(ctx, folder_id).await?;

        ensure_name_available(self.folder_repo.as_ref(), &folder.scope(), &name, Some(folder.id))
            .await?;

        let updated = self.folder_repo.rename(folder_id, ctx.user_id, &name).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            old_name = %folder.name,
            new_name = %updated.name,
            "Folder renamed"
        );

        Ok(updated)
    }

    /// Moves a folder under a new parent within its dataroom.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        let folder = self.get_folder(ctx, folder_id).await?;

        if let Some(parent_id) = new_parent_id {
            let parent = self.get_folder(ctx, parent_id).await?;
            if parent.dataroom_id != folder.dataroom_id {
                return Err(AppError::validation(
                    "Folders cannot be moved between datarooms",
                ));
            }
            ensure_valid_destination(self.folder_repo.as_ref(), folder_id, parent_id, ctx.user_id)
                .await?;
        }

        let scope = FolderScope {
            parent_id: new_parent_id,
            ..folder.scope()
        };
        ensure_name_available(self.folder_repo.as_ref(), &scope, &folder.name, Some(folder.id))
            .await?;

        let moved = self.folder_repo.move_to(&folder, new_parent_id).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            from = ?folder.parent_id,
            to = ?new_parent_id,
            "Folder moved"
        );

        Ok(moved)
    }

    /// Deletes a folder with its subfolders and files, then the files' bytes.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<(), AppError> {
        let folder = self.get_folder(ctx, folder_id).await?;

        let edges = self
            .folder_repo
            .find_edges(ctx.user_id, folder.dataroom_id)
            .await?;
        let subtree: Vec<Uuid> = collect_descendants(folder.id, &edges).into_iter().collect();
        let blob_keys = self
            .file_repo
            .find_blob_keys_in_folders(ctx.user_id, &subtree)
            .await?;

        if !self.folder_repo.delete(folder_id, ctx.user_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }
        let orphaned = purge_blobs(self.blobs.as_ref(), &blob_keys).await;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            subfolders = subtree.len().saturating_sub(1),
            files = blob_keys.len(),
            orphaned,
            "Folder deleted"
        );

        Ok(())
    }

    /// Returns the root-first breadcrumb path of a folder.
    pub async fn get_path(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Vec<FolderCrumb>, AppError> {
        let ancestry = resolve_ancestry(
            self.folder_repo.as_ref(),
            folder_id,
            ctx.user_id,
            MAX_BREADCRUMB_DEPTH,
        )
        .await?;

        if ancestry.crumbs.is_empty() {
            return Err(AppError::not_found("Folder not found"));
        }
        if ancestry.truncated {
            warn!(
                user_id = %ctx.user_id,
                folder_id = %folder_id,
                max_depth = MAX_BREADCRUMB_DEPTH,
                "Breadcrumb walk hit the depth cap; returning partial path"
            );
        }

        Ok(ancestry.crumbs)
    }

    async fn require_dataroom(&self, ctx: &RequestContext, dataroom_id: Uuid) -> Result<(), AppError> {
        self.dataroom_repo
            .find_by_id(dataroom_id, ctx.user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Dataroom not found"))
    }
}

/// Reject a request that names a dataroom other than the folder's own.
pub(crate) fn ensure_same_dataroom(folder: &Folder, requested: Option<Uuid>) -> Result<(), AppError> {
    match requested {
        Some(dataroom_id) if folder.dataroom_id != Some(dataroom_id) => Err(AppError::validation(
            "Folder belongs to a different dataroom",
        )),
        _ => Ok(()),
    }
}
