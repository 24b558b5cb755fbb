//! File repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use harveydrive_core::error::{AppError, ErrorKind};
use harveydrive_core::result::AppResult;
use harveydrive_core::types::pagination::{PageRequest, PageResponse};
use harveydrive_entity::file::{CreateFile, File};
use harveydrive_entity::folder::SearchScope;

use super::violates;

/// Unique index over `(owner_id, folder_id, name)`.
const FOLDER_NAME_KEY: &str = "files_owner_folder_name_key";

/// Upper bound on rows returned by a name search.
const SEARCH_LIMIT: i64 = 100;

/// Repository for file CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID regardless of owner.
    ///
    /// Only for access paths that authorize through a share.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Find a file by ID, owned by `owner_id`.
    pub async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Names of all files in one folder (or the top level when `None`).
    pub async fn find_names_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM files WHERE owner_id = $1 AND folder_id IS NOT DISTINCT FROM $2",
        )
        .bind(owner_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file names", e))
    }

    /// List files in a folder with pagination.
    ///
    /// Without a folder, lists the top-level files of `dataroom_id`.
    pub async fn find_by_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        dataroom_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>> {
        const FILTER: &str = "owner_id = $1 \
             AND folder_id IS NOT DISTINCT FROM $2 \
             AND ($2::uuid IS NOT NULL OR dataroom_id IS NOT DISTINCT FROM $3)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM files WHERE {FILTER}"))
            .bind(owner_id)
            .bind(folder_id)
            .bind(dataroom_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, File>(&format!(
            "SELECT * FROM files WHERE {FILTER} ORDER BY name ASC LIMIT $4 OFFSET $5"
        ))
        .bind(owner_id)
        .bind(folder_id)
        .bind(dataroom_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;

        Ok(PageResponse::new(files, page, total as u64))
    }

    /// All starred files of an owner, most recently updated first.
    pub async fn find_starred(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND is_starred ORDER BY updated_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list starred files", e))
    }

    /// Case-insensitive substring search on file names within `scope`.
    pub async fn search(
        &self,
        owner_id: Uuid,
        query: &str,
        scope: &SearchScope,
        dataroom_id: Uuid,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE owner_id = $1 \
               AND name ILIKE $2 ESCAPE '\\' \
               AND (folder_id = ANY($3) OR ($4 AND folder_id IS NULL AND dataroom_id = $5)) \
             ORDER BY name ASC \
             LIMIT $6",
        )
        .bind(owner_id)
        .bind(like_pattern(query))
        .bind(scope.folder_ids())
        .bind(scope.includes_unfiled())
        .bind(dataroom_id)
        .bind(SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))
    }

    /// Blob keys of every file directly inside the given folders.
    pub async fn find_blob_keys_in_folders(
        &self,
        owner_id: Uuid,
        folder_ids: &[Uuid],
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT blob_key FROM files WHERE owner_id = $1 AND folder_id = ANY($2)",
        )
        .bind(owner_id)
        .bind(folder_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list blob keys", e))
    }

    /// Blob keys of every file belonging to a dataroom.
    pub async fn find_blob_keys_in_dataroom(
        &self,
        owner_id: Uuid,
        dataroom_id: Uuid,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT f.blob_key FROM files f \
             LEFT JOIN folders d ON d.id = f.folder_id \
             WHERE f.owner_id = $1 AND (f.dataroom_id = $2 OR d.dataroom_id = $2)",
        )
        .bind(owner_id)
        .bind(dataroom_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list blob keys", e))
    }

    /// Create a new file record.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (owner_id, folder_id, dataroom_id, name, original_name, size, \
                                mime_type, blob_url, blob_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(data.folder_id)
        .bind(data.dataroom_id)
        .bind(&data.name)
        .bind(&data.original_name)
        .bind(data.size)
        .bind(&data.mime_type)
        .bind(&data.blob_url)
        .bind(&data.blob_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_name_error(e, &data.name, "Failed to create file"))
    }

    /// Rename a file.
    pub async fn rename(&self, id: Uuid, owner_id: Uuid, name: &str) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_error(e, name, "Failed to rename file"))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Move a file into a folder under a (possibly suffixed) name.
    pub async fn move_to(
        &self,
        id: Uuid,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        dataroom_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET folder_id = $3, dataroom_id = $4, name = $5, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(folder_id)
        .bind(dataroom_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_error(e, name, "Failed to move file"))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Set or clear the starred flag.
    pub async fn set_starred(&self, id: Uuid, owner_id: Uuid, starred: bool) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET is_starred = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(starred)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to star file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Set or clear the public-link flag.
    pub async fn set_public(&self, id: Uuid, public: bool) -> AppResult<()> {
        sqlx::query("UPDATE files SET is_public = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(public)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update file visibility", e)
            })?;
        Ok(())
    }

    /// Delete a file record. Shares cascade.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_name_error(err: sqlx::Error, name: &str, context: &'static str) -> AppError {
    if violates(&err, FOLDER_NAME_KEY) {
        AppError::conflict(format!("A file named '{name}' already exists here"))
            .with_details(serde_json::json!({ "attempted": name }))
    } else {
        AppError::with_source(ErrorKind::Database, context, err)
    }
}

/// Build an `ILIKE` pattern matching `query` as a literal substring.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
