//! Profile repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use harveydrive_core::error::{AppError, ErrorKind};
use harveydrive_core::result::AppResult;
use harveydrive_entity::profile::Profile;

/// Repository for locally mirrored user profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by email, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE LOWER(email) = LOWER($1) \
             ORDER BY updated_at DESC LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    /// Insert or refresh a profile from identity claims.
    ///
    /// Missing claims keep the stored value.
    pub async fn upsert(
        &self,
        id: Uuid,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (id, email, display_name) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                 email = COALESCE(EXCLUDED.email, profiles.email), \
                 display_name = COALESCE(EXCLUDED.display_name, profiles.display_name), \
                 updated_at = NOW() \
             RETURNING *",
        )
        .bind(id)
        .bind(email)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert profile", e))
    }
}
