//! Dataroom repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use harveydrive_core::error::{AppError, ErrorKind};
use harveydrive_core::result::AppResult;
use harveydrive_entity::dataroom::{CreateDataroom, Dataroom};

use super::violates;

const OWNER_NAME_KEY: &str = "datarooms_owner_name_key";

/// Repository for dataroom CRUD.
#[derive(Debug, Clone)]
pub struct DataroomRepository {
    pool: PgPool,
}

impl DataroomRepository {
    /// Create a new dataroom repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a dataroom by ID, owned by `owner_id`.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Dataroom>> {
        sqlx::query_as::<_, Dataroom>("SELECT * FROM datarooms WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find dataroom", e))
    }

    /// List an owner's datarooms, newest first.
    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Dataroom>> {
        sqlx::query_as::<_, Dataroom>(
            "SELECT * FROM datarooms WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list datarooms", e))
    }

    /// Names of all datarooms of an owner.
    pub async fn find_names(&self, owner_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT name FROM datarooms WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list dataroom names", e)
            })
    }

    /// Create a new dataroom.
    pub async fn create(&self, data: &CreateDataroom) -> AppResult<Dataroom> {
        sqlx::query_as::<_, Dataroom>(
            "INSERT INTO datarooms (owner_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_name_error(e, &data.name, "Failed to create dataroom"))
    }

    /// Rename a dataroom.
    pub async fn rename(&self, id: Uuid, owner_id: Uuid, name: &str) -> AppResult<Dataroom> {
        sqlx::query_as::<_, Dataroom>(
            "UPDATE datarooms SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_error(e, name, "Failed to rename dataroom"))?
        .ok_or_else(|| AppError::not_found(format!("Dataroom {id} not found")))
    }

    /// Delete a dataroom. Folders and files cascade.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM datarooms WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete dataroom", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_name_error(err: sqlx::Error, name: &str, context: &'static str) -> AppError {
    if violates(&err, OWNER_NAME_KEY) {
        AppError::conflict(format!("A dataroom named '{name}' already exists"))
            .with_details(serde_json::json!({ "attempted": name }))
    } else {
        AppError::with_source(ErrorKind::Database, context, err)
    }
}
