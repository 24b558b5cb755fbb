//! Recursive file-name search within a dataroom.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use harveydrive_core::error::AppError;
use harveydrive_database::repositories::{DataroomRepository, FileRepository, FolderRepository};
use harveydrive_entity::file::File;

use crate::context::RequestContext;
use crate::folder::descendants::collect_search_scope;
use crate::folder::service::ensure_same_dataroom;

/// Searches file names below a folder or across a dataroom.
#[derive(Debug, Clone)]
pub struct SearchService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Dataroom repository.
    dataroom_repo: Arc<DataroomRepository>,
}

/// Search request parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
    /// Case-insensitive substring of the file name.
    pub query: String,
    /// Dataroom to search in.
    pub dataroom_id: Uuid,
    /// Folder whose subtree to search; `None` searches the whole dataroom.
    pub folder_id: Option<Uuid>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        dataroom_repo: Arc<DataroomRepository>,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            dataroom_repo,
        }
    }

    /// Finds files whose name contains the query.
    pub async fn search(&self, ctx: &RequestContext, req: SearchRequest) -> Result<Vec<File>, AppError> {
        let query = req.query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query cannot be empty"));
        }

        self.dataroom_repo
            .find_by_id(req.dataroom_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Dataroom not found"))?;

        if let Some(folder_id) = req.folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id, ctx.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            ensure_same_dataroom(&folder, Some(req.dataroom_id))?;
        }

        let edges = self
            .folder_repo
            .find_edges(ctx.user_id, Some(req.dataroom_id))
            .await?;
        let scope = collect_search_scope(req.folder_id, &edges);

        let files = self
            .file_repo
            .search(ctx.user_id, query, &scope, req.dataroom_id)
            .await?;

        debug!(
            user_id = %ctx.user_id,
            dataroom_id = %req.dataroom_id,
            folder_id = ?req.folder_id,
            folders = edges.len(),
            hits = files.len(),
            "File search"
        );

        Ok(files)
    }
}
