//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file uploaded to HarveyDrive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The uploading user, who exclusively owns the file.
    pub owner_id: Uuid,
    /// The folder containing this file (null for the top level).
    pub folder_id: Option<Uuid>,
    /// The dataroom this file was uploaded into, if any.
    pub dataroom_id: Option<Uuid>,
    /// Display name, unique within `(owner_id, folder_id)`.
    pub name: String,
    /// Name as supplied by the uploader, before de-duplication.
    pub original_name: String,
    /// File size in bytes.
    pub size: i64,
    /// MIME type of the file.
    pub mime_type: String,
    /// Public URL of the stored bytes.
    pub blob_url: String,
    /// Key of the stored bytes within the blob store.
    #[serde(skip_serializing)]
    pub blob_key: String,
    /// Whether the owner starred the file.
    pub is_starred: bool,
    /// Whether a public link to the file exists.
    pub is_public: bool,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .filter(|(base, ext)| !base.is_empty() && !ext.is_empty())
            .map(|(_, ext)| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file owner.
    pub owner_id: Uuid,
    /// The folder to place the file in.
    pub folder_id: Option<Uuid>,
    /// The dataroom the file belongs to.
    pub dataroom_id: Option<Uuid>,
    /// The de-duplicated file name.
    pub name: String,
    /// The name supplied by the uploader.
    pub original_name: String,
    /// File size in bytes.
    pub size: i64,
    /// MIME type.
    pub mime_type: String,
    /// Public URL of the stored bytes.
    pub blob_url: String,
    /// Key within the blob store.
    pub blob_key: String,
}
