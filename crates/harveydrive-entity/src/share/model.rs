//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Permission level a share grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_permission", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SharePermission {
    /// Read-only access.
    View,
    /// Read and write access.
    Edit,
}

impl std::str::FromStr for SharePermission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            other => Err(format!("Unknown share permission '{other}'")),
        }
    }
}

/// A grant of access to one file, either to a user or through a public link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// The shared file.
    pub file_id: Uuid,
    /// User who created the share.
    pub shared_by_id: Uuid,
    /// Recipient; `None` for public links.
    pub shared_with_id: Option<Uuid>,
    /// Permission level granted.
    pub permission: SharePermission,
    /// Token of a public link.
    pub share_token: Option<String>,
    /// When the share expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// Whether this share is a public tokenized link.
    pub fn is_public_link(&self) -> bool {
        self.shared_with_id.is_none() && self.share_token.is_some()
    }

    /// Whether the share has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Data required to create a new share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// The shared file.
    pub file_id: Uuid,
    /// User creating the share.
    pub shared_by_id: Uuid,
    /// Recipient (None for a public link).
    pub shared_with_id: Option<Uuid>,
    /// Permission level.
    pub permission: SharePermission,
    /// Public link token.
    pub share_token: Option<String>,
    /// Expiry time (None = never).
    pub expires_at: Option<DateTime<Utc>>,
}
