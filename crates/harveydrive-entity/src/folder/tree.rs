//! Lightweight folder projections used by path and subtree resolution.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One breadcrumb entry: a folder reduced to what a path display needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FolderCrumb {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Option<Uuid>,
}

/// A `parent_id` edge of the folder forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FolderEdge {
    /// Folder ID.
    pub id: Uuid,
    /// Parent folder ID.
    pub parent_id: Option<Uuid>,
}

/// The set of folders a recursive file search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Files directly inside any of these folders.
    Subtree(HashSet<Uuid>),
    /// Files directly inside exactly this folder.
    Exact(Uuid),
    /// Every file of the dataroom: those inside any of these folders plus
    /// those in no folder at all.
    Dataroom(HashSet<Uuid>),
}

impl SearchScope {
    /// Folder IDs to match `files.folder_id` against.
    pub fn folder_ids(&self) -> Vec<Uuid> {
        match self {
            Self::Subtree(ids) | Self::Dataroom(ids) => ids.iter().copied().collect(),
            Self::Exact(id) => vec![*id],
        }
    }

    /// Whether files with no folder are also in scope.
    pub fn includes_unfiled(&self) -> bool {
        matches!(self, Self::Dataroom(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_scope_targets_single_folder() {
        let id = Uuid::new_v4();
        let scope = SearchScope::Exact(id);
        assert_eq!(scope.folder_ids(), vec![id]);
        assert!(!scope.includes_unfiled());
    }

    #[test]
    fn test_dataroom_scope_includes_unfiled() {
        let scope = SearchScope::Dataroom(HashSet::new());
        assert!(scope.includes_unfiled());
        assert!(scope.folder_ids().is_empty());
    }
}
