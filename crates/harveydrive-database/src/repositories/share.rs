//! Share repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use harveydrive_core::error::{AppError, ErrorKind};
use harveydrive_core::result::AppResult;
use harveydrive_entity::file::File;
use harveydrive_entity::share::{CreateShare, Share};

/// Repository for user shares and public links.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Find a public link by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE share_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share by token", e)
            })
    }

    /// List every share of one file.
    pub async fn find_by_file(&self, file_id: Uuid) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE file_id = $1 ORDER BY created_at DESC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// Find the unexpired direct share of `file_id` to `user_id`, if any.
    pub async fn find_active_for_user(
        &self,
        file_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares \
             WHERE file_id = $1 AND shared_with_id = $2 \
               AND (expires_at IS NULL OR expires_at > NOW()) \
             LIMIT 1",
        )
        .bind(file_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Files shared directly with a user through unexpired shares.
    pub async fn find_files_shared_with(&self, user_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT DISTINCT ON (f.id) f.* FROM files f \
             INNER JOIN shares s ON s.file_id = f.id \
             WHERE s.shared_with_id = $1 \
               AND (s.expires_at IS NULL OR s.expires_at > NOW()) \
             ORDER BY f.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list files shared with user", e)
        })
    }

    /// Number of public links remaining on a file.
    pub async fn count_public_links(&self, file_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM shares WHERE file_id = $1 AND share_token IS NOT NULL",
        )
        .bind(file_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count public links", e))
    }

    /// Create a new share.
    pub async fn create(&self, data: &CreateShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (file_id, shared_by_id, shared_with_id, permission, share_token, \
                                 expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.file_id)
        .bind(data.shared_by_id)
        .bind(data.shared_with_id)
        .bind(data.permission)
        .bind(&data.share_token)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share", e))
    }

    /// Delete a share.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }
}
