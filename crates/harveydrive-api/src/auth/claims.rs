//! Access token claims issued by the auth provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harveydrive_service::context::RequestContext;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the provider's user ID.
    pub sub: Uuid,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Email address of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when the provider puts it at the top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form profile data attached by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<UserMetadata>,
}

/// Profile fields of the provider's `user_metadata` claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Full name entered at sign-up.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Short name.
    #[serde(default)]
    pub name: Option<String>,
}

impl AccessClaims {
    /// Best available display name.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or_else(|| {
                self.user_metadata
                    .as_ref()
                    .and_then(|m| m.full_name.as_deref().or(m.name.as_deref()))
            })
            .filter(|n| !n.trim().is_empty())
    }

    /// Converts the claims into the per-request service context.
    pub fn into_context(self) -> RequestContext {
        let display_name = self.display_name().map(str::to_string);
        RequestContext::new(self.sub, self.email, display_name)
    }
}
