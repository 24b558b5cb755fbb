//! Share creation, listing, revocation and public link resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use harveydrive_core::error::AppError;
use harveydrive_core::traits::{BlobStore, ByteStream};
use harveydrive_database::repositories::{FileRepository, ProfileRepository, ShareRepository};
use harveydrive_entity::file::File;
use harveydrive_entity::share::{CreateShare, Share, SharePermission};

use super::link::LinkService;
use crate::context::RequestContext;

/// Manages shares of the caller's files.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Profile repository, to resolve recipients by email.
    profile_repo: Arc<ProfileRepository>,
    /// Blob store, for public downloads.
    blobs: Arc<dyn BlobStore>,
    /// Link token generator.
    links: LinkService,
}

/// Request to share a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// Recipient email; `None` creates a public link.
    pub email: Option<String>,
    /// Permission granted.
    #[serde(default = "default_permission")]
    pub permission: SharePermission,
    /// Expiration time (None = never).
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_permission() -> SharePermission {
    SharePermission::View
}

/// A file reached through a public link.
#[derive(Debug, Clone, Serialize)]
pub struct SharedLink {
    /// The shared file.
    pub file: File,
    /// Permission the link grants.
    pub permission: SharePermission,
    /// When the link stops working.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        file_repo: Arc<FileRepository>,
        profile_repo: Arc<ProfileRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            share_repo,
            file_repo,
            profile_repo,
            blobs,
            links: LinkService::new(),
        }
    }

    /// Lists the shares of a file owned by the caller.
    pub async fn list_for_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<Vec<Share>, AppError> {
        self.owned_file(ctx, file_id).await?;
        self.share_repo.find_by_file(file_id).await
    }

    /// Lists files other users shared with the caller.
    pub async fn shared_with_me(&self, ctx: &RequestContext) -> Result<Vec<File>, AppError> {
        self.share_repo.find_files_shared_with(ctx.user_id).await
    }

    /// Shares a file with a user by email, or creates a public link.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: CreateShareRequest,
    ) -> Result<Share, AppError> {
        let file = self.owned_file(ctx, file_id).await?;

        if req.expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(AppError::validation("Expiry must be in the future"));
        }

        let (shared_with_id, share_token) = match req.email.as_deref().map(str::trim) {
            Some("") => return Err(AppError::validation("Recipient email cannot be empty")),
            Some(email) => {
                let recipient = self
                    .profile_repo
                    .find_by_email(email)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("No user with email '{email}'")))?;
                if recipient.id == ctx.user_id {
                    return Err(AppError::validation("You cannot share a file with yourself"));
                }
                (Some(recipient.id), None)
            }
            None => (None, Some(self.links.generate_token())),
        };

        let share = self
            .share_repo
            .create(&CreateShare {
                file_id: file.id,
                shared_by_id: ctx.user_id,
                shared_with_id,
                permission: req.permission,
                share_token,
                expires_at: req.expires_at,
            })
            .await?;

        if share.is_public_link() && !file.is_public {
            self.file_repo.set_public(file.id, true).await?;
        }

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            share_id = %share.id,
            public = share.is_public_link(),
            "Share created"
        );

        Ok(share)
    }

    /// Revokes a share created by the caller.
    pub async fn revoke(&self, ctx: &RequestContext, share_id: Uuid) -> Result<(), AppError> {
        let share = self
            .share_repo
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.shared_by_id != ctx.user_id {
            return Err(AppError::authorization("Only the creator can revoke a share"));
        }

        self.share_repo.delete(share_id).await?;

        if share.is_public_link() && self.share_repo.count_public_links(share.file_id).await? == 0 {
            self.file_repo.set_public(share.file_id, false).await?;
        }

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            file_id = %share.file_id,
            "Share revoked"
        );

        Ok(())
    }

    /// Resolves an unexpired public link.
    pub async fn resolve_link(&self, token: &str) -> Result<SharedLink, AppError> {
        let not_found = || AppError::not_found("Share link not found or expired");

        if !self.links.is_well_formed(token) {
            return Err(not_found());
        }
        let share = self
            .share_repo
            .find_by_token(token)
            .await?
            .filter(|s| s.is_public_link() && !s.is_expired_at(Utc::now()))
            .ok_or_else(not_found)?;
        let file = self
            .file_repo
            .find_by_id(share.file_id)
            .await?
            .ok_or_else(not_found)?;

        Ok(SharedLink {
            file,
            permission: share.permission,
            expires_at: share.expires_at,
        })
    }

    /// Opens the bytes behind a public link.
    pub async fn open_link(&self, token: &str) -> Result<(File, ByteStream), AppError> {
        let link = self.resolve_link(token).await?;
        let stream = self.blobs.get(&link.file.blob_key).await?;
        Ok((link.file, stream))
    }

    async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        self.file_repo
            .find_owned(file_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}
