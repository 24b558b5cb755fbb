//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder ID (null for the root level of its dataroom).
    pub parent_id: Option<Uuid>,
    /// The dataroom this folder belongs to, if any.
    pub dataroom_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// The sibling scope this folder's name must be unique in.
    pub fn scope(&self) -> FolderScope {
        FolderScope {
            owner_id: self.owner_id,
            parent_id: self.parent_id,
            dataroom_id: self.dataroom_id,
        }
    }
}

/// The `(owner, parent, dataroom)` tuple defining a folder sibling set.
///
/// `None` components match `NULL` columns, so two root-level folders of the
/// same dataroom share a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderScope {
    /// Owner of the siblings.
    pub owner_id: Uuid,
    /// Common parent folder.
    pub parent_id: Option<Uuid>,
    /// Common dataroom.
    pub dataroom_id: Option<Uuid>,
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder (None for root level).
    pub parent_id: Option<Uuid>,
    /// Owning dataroom.
    pub dataroom_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
}

impl CreateFolder {
    /// The scope the new folder will be created in.
    pub fn scope(&self) -> FolderScope {
        FolderScope {
            owner_id: self.owner_id,
            parent_id: self.parent_id,
            dataroom_id: self.dataroom_id,
        }
    }
}
