//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harveydrive_entity::share::Share;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Readiness of the service's backing dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`.
    pub status: String,
    /// `connected` or `unreachable`.
    pub database: String,
    /// `available` or `unavailable`.
    pub storage: String,
    /// Blob store backend name.
    pub storage_provider: String,
}

/// Acknowledges a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// ID of the removed row.
    pub id: Uuid,
    /// Always `true`.
    pub deleted: bool,
}

impl DeletedResponse {
    /// Acknowledgement for `id`.
    pub fn new(id: Uuid) -> Self {
        Self { id, deleted: true }
    }
}

/// A share plus the API path of its public link, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ShareResponse {
    /// The share row.
    #[serde(flatten)]
    pub share: Share,
    /// `/api/s/{token}` for public links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_path: Option<String>,
}

impl From<Share> for ShareResponse {
    fn from(share: Share) -> Self {
        let link_path = share.share_token.as_ref().map(|t| format!("/api/s/{t}"));
        Self { share, link_path }
    }
}
