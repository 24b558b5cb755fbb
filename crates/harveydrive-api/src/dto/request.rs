//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use harveydrive_entity::share::SharePermission;

/// Body of a dataroom create request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDataroomRequest {
    /// Desired name; suffixed if taken.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Body of any rename request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Body of a folder create request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Parent folder (None for the dataroom root level).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Dataroom the folder belongs to.
    #[serde(default)]
    pub dataroom_id: Option<Uuid>,
}

/// Body of a folder move request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveFolderRequest {
    /// New parent; `null` moves the folder to the root level.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body of a file move request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveFileRequest {
    /// Target folder; `null` moves the file to the top level.
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

/// Body of a star toggle request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StarRequest {
    /// New starred state.
    pub starred: bool,
}

/// Body of a share create request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareRequest {
    /// Recipient email; omit to create a public link.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Permission level (default: view).
    #[serde(default)]
    pub permission: Option<SharePermission>,
    /// Expiry time (None = never).
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Query of `GET /api/files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileListParams {
    /// Folder to list.
    pub folder_id: Option<Uuid>,
    /// Dataroom whose top level to list.
    pub dataroom_id: Option<Uuid>,
}

/// Query of `GET /api/folders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderListParams {
    /// Parent folder to list.
    pub parent_id: Option<Uuid>,
    /// Dataroom whose root level to list.
    pub dataroom_id: Option<Uuid>,
}

/// Query of `GET /api/files/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchParams {
    /// Substring of the file name.
    #[validate(length(min = 1, max = 255, message = "Search query must be 1-255 characters"))]
    pub q: String,
    /// Dataroom to search in.
    pub dataroom_id: Uuid,
    /// Folder whose subtree to search.
    pub folder_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let req = CreateFolderRequest {
            name: String::new(),
            parent_id: None,
            dataroom_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_share_email_validated() {
        let bad = CreateShareRequest {
            email: Some("not-an-email".to_string()),
            permission: None,
            expires_at: None,
        };
        assert!(bad.validate().is_err());

        let public = CreateShareRequest {
            email: None,
            permission: Some(SharePermission::View),
            expires_at: None,
        };
        assert!(public.validate().is_ok());
    }

    #[test]
    fn test_move_accepts_null_parent() {
        let req: MoveFolderRequest = serde_json::from_str(r#"{"parent_id": null}"#).expect("parse");
        assert!(req.parent_id.is_none());
    }
}
