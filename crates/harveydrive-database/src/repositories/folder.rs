//! Folder repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use harveydrive_core::error::{AppError, ErrorKind};
use harveydrive_core::result::AppResult;
use harveydrive_entity::folder::{CreateFolder, Folder, FolderCrumb, FolderEdge, FolderScope};

use super::violates;

/// Unique index over `(owner_id, parent_id, dataroom_id, name)`.
const SCOPE_NAME_KEY: &str = "folders_scope_name_key";

/// Repository for folder CRUD and tree queries.
///
/// Every query is scoped to an owner; a folder of another user behaves as
/// if it did not exist.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID, owned by `owner_id`.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Fetch the breadcrumb projection of one folder.
    pub async fn find_crumb(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<FolderCrumb>> {
        sqlx::query_as::<_, FolderCrumb>(
            "SELECT id, name, parent_id FROM folders WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch breadcrumb", e))
    }

    /// IDs of folders in `scope` named exactly `name`.
    ///
    /// `NULL` parent and dataroom columns compare equal to `None`.
    pub async fn find_ids_named(&self, scope: &FolderScope, name: &str) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM folders \
             WHERE owner_id = $1 \
               AND parent_id IS NOT DISTINCT FROM $2 \
               AND dataroom_id IS NOT DISTINCT FROM $3 \
               AND name = $4",
        )
        .bind(scope.owner_id)
        .bind(scope.parent_id)
        .bind(scope.dataroom_id)
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query sibling names", e))
    }

    /// List the folders directly inside `scope`, ordered by name.
    pub async fn find_children(&self, scope: &FolderScope) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE owner_id = $1 \
               AND parent_id IS NOT DISTINCT FROM $2 \
               AND dataroom_id IS NOT DISTINCT FROM $3 \
             ORDER BY name ASC",
        )
        .bind(scope.owner_id)
        .bind(scope.parent_id)
        .bind(scope.dataroom_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// All parent edges of one owner's folders inside a dataroom.
    pub async fn find_edges(
        &self,
        owner_id: Uuid,
        dataroom_id: Option<Uuid>,
    ) -> AppResult<Vec<FolderEdge>> {
        sqlx::query_as::<_, FolderEdge>(
            "SELECT id, parent_id FROM folders \
             WHERE owner_id = $1 AND dataroom_id IS NOT DISTINCT FROM $2",
        )
        .bind(owner_id)
        .bind(dataroom_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folder edges", e))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (owner_id, parent_id, dataroom_id, name) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(data.parent_id)
        .bind(data.dataroom_id)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, SCOPE_NAME_KEY) {
                AppError::name_conflict(&data.name)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create folder", e)
            }
        })
    }

    /// Rename a folder.
    pub async fn rename(&self, id: Uuid, owner_id: Uuid, name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, SCOPE_NAME_KEY) {
                AppError::name_conflict(name)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to rename folder", e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Re-parent a folder within its dataroom.
    pub async fn move_to(&self, folder: &Folder, parent_id: Option<Uuid>) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(folder.id)
        .bind(folder.owner_id)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, SCOPE_NAME_KEY) {
                AppError::name_conflict(&folder.name)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to move folder", e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    /// Delete a folder; children and contained files cascade.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;
        Ok(result.rows_affected() > 0)
    }
}
