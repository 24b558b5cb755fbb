//! Dataroom entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named workspace scoping folders and files, owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dataroom {
    /// Unique dataroom identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Dataroom name, unique per owner.
    pub name: String,
    /// When the dataroom was created.
    pub created_at: DateTime<Utc>,
    /// When the dataroom was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new dataroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDataroom {
    /// The owning user.
    pub owner_id: Uuid,
    /// Name already made unique among the owner's datarooms.
    pub name: String,
}
