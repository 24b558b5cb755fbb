//! Shared application state threaded through every handler.

use std::sync::Arc;

use harveydrive_core::config::AppConfig;
use harveydrive_core::traits::BlobStore;
use harveydrive_database::DatabasePool;
use harveydrive_service::{
    DataroomService, FileService, FolderService, ProfileService, SearchService, ShareService,
    UploadService,
};

use crate::auth::TokenVerifier;

/// Everything a handler may need, cheaply clonable.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool.
    pub db: DatabasePool,
    /// Blob store holding file bytes.
    pub blobs: Arc<dyn BlobStore>,
    /// Bearer token verifier.
    pub verifier: Arc<TokenVerifier>,

    /// Profile sync.
    pub profile_service: Arc<ProfileService>,
    /// Dataroom CRUD.
    pub dataroom_service: Arc<DataroomService>,
    /// Folder CRUD and breadcrumbs.
    pub folder_service: Arc<FolderService>,
    /// File CRUD and download.
    pub file_service: Arc<FileService>,
    /// File upload.
    pub upload_service: Arc<UploadService>,
    /// Recursive file search.
    pub search_service: Arc<SearchService>,
    /// Shares and public links.
    pub share_service: Arc<ShareService>,
}
