//! Bearer token verification configuration.
//!
//! Sign-in and session handling live with the external auth provider;
//! HarveyDrive only verifies the HS256 access tokens it issues.

use serde::{Deserialize, Serialize};

/// Settings for verifying the auth provider's access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret of the auth provider.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `aud` claim. Not checked when unset.
    #[serde(default)]
    pub audience: Option<String>,
    /// Allowed clock skew in seconds when checking `exp`.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            audience: None,
            leeway_seconds: default_leeway(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    5
}
