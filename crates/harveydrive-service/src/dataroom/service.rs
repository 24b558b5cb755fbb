//! Dataroom CRUD with auto-suffix naming.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use harveydrive_core::error::AppError;
use harveydrive_core::traits::BlobStore;
use harveydrive_database::repositories::{DataroomRepository, FileRepository};
use harveydrive_entity::dataroom::{CreateDataroom, Dataroom};

use crate::blob_cleanup::purge_blobs;
use crate::context::RequestContext;
use crate::naming::{normalize_name, retry_on_conflict, unique_name};

/// Manages the caller's datarooms.
#[derive(Debug, Clone)]
pub struct DataroomService {
    /// Dataroom repository.
    dataroom_repo: Arc<DataroomRepository>,
    /// File repository, for blob cleanup on delete.
    file_repo: Arc<FileRepository>,
    /// Blob store holding file bytes.
    blobs: Arc<dyn BlobStore>,
}

impl DataroomService {
    /// Creates a new dataroom service.
    pub fn new(
        dataroom_repo: Arc<DataroomRepository>,
        file_repo: Arc<FileRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            dataroom_repo,
            file_repo,
            blobs,
        }
    }

    /// Lists the caller's datarooms.
    pub async fn list_datarooms(&self, ctx: &RequestContext) -> Result<Vec<Dataroom>, AppError> {
        self.dataroom_repo.find_by_owner(ctx.user_id).await
    }

    /// Gets one of the caller's datarooms.
    pub async fn get_dataroom(&self, ctx: &RequestContext, dataroom_id: Uuid) -> Result<Dataroom, AppError> {
        self.dataroom_repo
            .find_by_id(dataroom_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Dataroom not found"))
    }

    /// Creates a dataroom, suffixing the name if the caller already uses it.
    pub async fn create_dataroom(&self, ctx: &RequestContext, name: &str) -> Result<Dataroom, AppError> {
        let candidate = normalize_name(name, "Dataroom")?;

        let dataroom = retry_on_conflict(|| async {
            let existing = self.existing_names(ctx.user_id, None).await?;
            let data = CreateDataroom {
                owner_id: ctx.user_id,
                name: unique_name(&candidate, &existing),
            };
            self.dataroom_repo.create(&data).await
        })
        .await?;

        info!(
            user_id = %ctx.user_id,
            dataroom_id = %dataroom.id,
            name = %dataroom.name,
            "Dataroom created"
        );

        Ok(dataroom)
    }

    /// Renames a dataroom, suffixing the name if another dataroom uses it.
    pub async fn rename_dataroom(
        &self,
        ctx: &RequestContext,
        dataroom_id: Uuid,
        name: &str,
    ) -> Result<Dataroom, AppError> {
        let candidate = normalize_name(name, "Dataroom")?;
        let current = self.get_dataroom(ctx, dataroom_id).await?;

        let renamed = retry_on_conflict(|| async {
            let existing = self.existing_names(ctx.user_id, Some(&current.name)).await?;
            let resolved = unique_name(&candidate, &existing);
            self.dataroom_repo.rename(dataroom_id, ctx.user_id, &resolved).await
        })
        .await?;

        info!(
            user_id = %ctx.user_id,
            dataroom_id = %dataroom_id,
            old_name = %current.name,
            new_name = %renamed.name,
            "Dataroom renamed"
        );

        Ok(renamed)
    }

    /// Deletes a dataroom with all of its folders, files and file bytes.
    pub async fn delete_dataroom(&self, ctx: &RequestContext, dataroom_id: Uuid) -> Result<(), AppError> {
        let dataroom = self.get_dataroom(ctx, dataroom_id).await?;

        let blob_keys = self
            .file_repo
            .find_blob_keys_in_dataroom(ctx.user_id, dataroom_id)
            .await?;
        if !self.dataroom_repo.delete(dataroom_id, ctx.user_id).await? {
            return Err(AppError::not_found("Dataroom not found"));
        }
        let orphaned = purge_blobs(self.blobs.as_ref(), &blob_keys).await;

        info!(
            user_id = %ctx.user_id,
            dataroom_id = %dataroom_id,
            name = %dataroom.name,
            files = blob_keys.len(),
            orphaned,
            "Dataroom deleted"
        );

        Ok(())
    }

    async fn existing_names(
        &self,
        owner_id: Uuid,
        except: Option<&str>,
    ) -> Result<HashSet<String>, AppError> {
        let mut names: HashSet<String> = self
            .dataroom_repo
            .find_names(owner_id)
            .await?
            .into_iter()
            .collect();
        if let Some(own) = except {
            names.remove(own);
        }
        Ok(names)
    }
}
