//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Local mirror of an auth-provider user, used to resolve share recipients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// The auth provider's user ID.
    pub id: Uuid,
    /// Email address, if the provider supplied one.
    pub email: Option<String>,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// When the profile was first seen.
    pub created_at: DateTime<Utc>,
    /// When the profile was last refreshed.
    pub updated_at: DateTime<Utc>,
}
