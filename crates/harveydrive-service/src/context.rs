//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built from the verified bearer token and passed into service methods so
/// that every operation knows *who* is acting. All owner-scoped queries use
/// `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID, as issued by the auth provider.
    pub user_id: Uuid,
    /// Email claim of the token, if present.
    pub email: Option<String>,
    /// Display name claim of the token, if present.
    pub display_name: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            user_id,
            email,
            display_name,
            request_time: Utc::now(),
        }
    }
}
