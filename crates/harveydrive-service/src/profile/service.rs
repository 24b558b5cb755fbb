//! Profile synchronization from token claims.

use std::sync::Arc;

use tracing::debug;

use harveydrive_core::error::AppError;
use harveydrive_database::repositories::ProfileRepository;
use harveydrive_entity::profile::Profile;

use crate::context::RequestContext;

/// Keeps the local profile of the caller in sync with their token.
#[derive(Debug, Clone)]
pub struct ProfileService {
    /// Profile repository.
    profile_repo: Arc<ProfileRepository>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(profile_repo: Arc<ProfileRepository>) -> Self {
        Self { profile_repo }
    }

    /// Upserts and returns the caller's profile.
    pub async fn sync(&self, ctx: &RequestContext) -> Result<Profile, AppError> {
        let email = ctx.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
        let profile = self
            .profile_repo
            .upsert(ctx.user_id, email, ctx.display_name.as_deref())
            .await?;
        debug!(user_id = %ctx.user_id, "Profile synchronized");
        Ok(profile)
    }
}
