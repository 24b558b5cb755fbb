//! Breadcrumb reconstruction by walking parent pointers.

use async_trait::async_trait;
use uuid::Uuid;

use harveydrive_core::error::AppError;
use harveydrive_core::result::AppResult;
use harveydrive_database::repositories::FolderRepository;
use harveydrive_entity::folder::FolderCrumb;

/// Depth cap on breadcrumb walks.
pub const MAX_BREADCRUMB_DEPTH: usize = 20;

/// Owner-scoped fetch of a single folder's breadcrumb fields.
#[async_trait]
pub trait FolderLookup: Send + Sync {
    /// Fetch `{id, name, parent_id}` of a folder, or `None` if the owner has
    /// no such folder.
    async fn find_crumb(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<Option<FolderCrumb>>;
}

#[async_trait]
impl FolderLookup for FolderRepository {
    async fn find_crumb(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<Option<FolderCrumb>> {
        FolderRepository::find_crumb(self, folder_id, owner_id).await
    }
}

/// A root-first folder path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry {
    /// Crumbs from the outermost reached folder down to the leaf.
    pub crumbs: Vec<FolderCrumb>,
    /// The depth cap stopped the walk while a parent was still pending.
    pub truncated: bool,
}

/// Walk from `leaf_id` up to its root, at most `max_depth` folders.
///
/// A missing folder ends the walk without error. When the cap stops the
/// walk, the leaf-nearest `max_depth` crumbs are kept.
pub async fn resolve_ancestry<L>(
    lookup: &L,
    leaf_id: Uuid,
    owner_id: Uuid,
    max_depth: usize,
) -> AppResult<Ancestry>
where
    L: FolderLookup + ?Sized,
{
    let mut crumbs = Vec::new();
    let mut current = Some(leaf_id);

    while let Some(folder_id) = current {
        if crumbs.len() >= max_depth {
            break;
        }
        match lookup.find_crumb(folder_id, owner_id).await? {
            Some(crumb) => {
                current = crumb.parent_id;
                crumbs.push(crumb);
            }
            None => current = None,
        }
    }

    crumbs.reverse();
    Ok(Ancestry {
        crumbs,
        truncated: current.is_some(),
    })
}

/// Check that `folder_id` may be placed under `destination_id`.
///
/// The destination's path must not contain the folder itself (which would
/// close a cycle) and must resolve fully within the depth cap.
pub async fn ensure_valid_destination<L>(
    lookup: &L,
    folder_id: Uuid,
    destination_id: Uuid,
    owner_id: Uuid,
) -> AppResult<()>
where
    L: FolderLookup + ?Sized,
{
    let path = resolve_ancestry(lookup, destination_id, owner_id, MAX_BREADCRUMB_DEPTH).await?;
    if path.crumbs.iter().any(|c| c.id == folder_id) {
        return Err(AppError::validation(
            "Cannot move a folder into itself or one of its subfolders",
        ));
    }
    if path.truncated {
        return Err(AppError::validation("Destination folder is nested too deeply"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use harveydrive_core::error::ErrorKind;

    use super::*;

    #[derive(Default)]
    struct MemoryFolders {
        folders: HashMap<Uuid, (Uuid, FolderCrumb)>,
        fetches: AtomicUsize,
    }

    impl MemoryFolders {
        fn add(&mut self, owner_id: Uuid, name: &str, parent_id: Option<Uuid>) -> Uuid {
            let id = Uuid::new_v4();
            self.insert(owner_id, id, name, parent_id);
            id
        }

        fn insert(&mut self, owner_id: Uuid, id: Uuid, name: &str, parent_id: Option<Uuid>) {
            let crumb = FolderCrumb {
                id,
                name: name.to_string(),
                parent_id,
            };
            self.folders.insert(id, (owner_id, crumb));
        }
    }

    #[async_trait]
    impl FolderLookup for MemoryFolders {
        async fn find_crumb(
            &self,
            folder_id: Uuid,
            owner_id: Uuid,
        ) -> AppResult<Option<FolderCrumb>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .folders
                .get(&folder_id)
                .filter(|(owner, _)| *owner == owner_id)
                .map(|(_, crumb)| crumb.clone()))
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl FolderLookup for FailingLookup {
        async fn find_crumb(&self, _: Uuid, _: Uuid) -> AppResult<Option<FolderCrumb>> {
            Err(AppError::database("connection reset"))
        }
    }

    /// Builds `root -> A -> B -> C` and returns the lookup with the four ids.
    fn chain(owner: Uuid) -> (MemoryFolders, [Uuid; 4]) {
        let mut folders = MemoryFolders::default();
        let root = folders.add(owner, "root", None);
        let a = folders.add(owner, "A", Some(root));
        let b = folders.add(owner, "B", Some(a));
        let c = folders.add(owner, "C", Some(b));
        (folders, [root, a, b, c])
    }

    fn names(ancestry: &Ancestry) -> Vec<&str> {
        ancestry.crumbs.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_full_path_is_root_first() {
        let owner = Uuid::new_v4();
        let (folders, [root, _, _, c]) = chain(owner);

        let ancestry = resolve_ancestry(&folders, c, owner, MAX_BREADCRUMB_DEPTH)
            .await
            .unwrap();
        assert_eq!(names(&ancestry), ["root", "A", "B", "C"]);
        assert_eq!(ancestry.crumbs[0].id, root);
        assert!(!ancestry.truncated);
    }

    #[tokio::test]
    async fn test_depth_equal_to_chain_length_is_complete() {
        let owner = Uuid::new_v4();
        let (folders, [.., c]) = chain(owner);

        let ancestry = resolve_ancestry(&folders, c, owner, 4).await.unwrap();
        assert_eq!(names(&ancestry), ["root", "A", "B", "C"]);
        assert!(!ancestry.truncated);
    }

    #[tokio::test]
    async fn test_truncation_keeps_leaf_nearest() {
        let owner = Uuid::new_v4();
        let (folders, [.., c]) = chain(owner);

        let ancestry = resolve_ancestry(&folders, c, owner, 2).await.unwrap();
        assert_eq!(names(&ancestry), ["B", "C"]);
        assert!(ancestry.truncated);
        assert_eq!(folders.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_other_owner_sees_nothing() {
        let owner = Uuid::new_v4();
        let (folders, [.., c]) = chain(owner);

        let ancestry = resolve_ancestry(&folders, c, Uuid::new_v4(), MAX_BREADCRUMB_DEPTH)
            .await
            .unwrap();
        assert!(ancestry.crumbs.is_empty());
        assert!(!ancestry.truncated);
    }

    #[tokio::test]
    async fn test_missing_parent_ends_path() {
        let owner = Uuid::new_v4();
        let mut folders = MemoryFolders::default();
        let orphan = folders.add(owner, "orphan", Some(Uuid::new_v4()));

        let ancestry = resolve_ancestry(&folders, orphan, owner, MAX_BREADCRUMB_DEPTH)
            .await
            .unwrap();
        assert_eq!(names(&ancestry), ["orphan"]);
        assert!(!ancestry.truncated);
    }

    #[tokio::test]
    async fn test_cycle_stops_at_cap() {
        let owner = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut folders = MemoryFolders::default();
        folders.insert(owner, a, "A", Some(b));
        folders.insert(owner, b, "B", Some(a));

        let ancestry = resolve_ancestry(&folders, a, owner, MAX_BREADCRUMB_DEPTH)
            .await
            .unwrap();
        assert_eq!(ancestry.crumbs.len(), MAX_BREADCRUMB_DEPTH);
        assert!(ancestry.truncated);
        assert_eq!(ancestry.crumbs.last().map(|c| c.id), Some(a));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let err = resolve_ancestry(&FailingLookup, Uuid::new_v4(), Uuid::new_v4(), 5)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
    }

    #[tokio::test]
    async fn test_destination_inside_own_subtree_is_rejected() {
        let owner = Uuid::new_v4();
        let (folders, [root, a, b, c]) = chain(owner);

        for destination in [root, b, c] {
            let err = ensure_valid_destination(&folders, root, destination, owner)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert!(err.message.contains("subfolders"));
        }

        let err = ensure_valid_destination(&folders, a, c, owner).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_destination_outside_subtree_is_accepted() {
        let owner = Uuid::new_v4();
        let (mut folders, [root, a, b, c]) = chain(owner);
        let sibling = folders.add(owner, "sibling", Some(root));

        ensure_valid_destination(&folders, c, a, owner).await.unwrap();
        ensure_valid_destination(&folders, b, sibling, owner).await.unwrap();
        ensure_valid_destination(&folders, sibling, c, owner).await.unwrap();
    }

    #[tokio::test]
    async fn test_destination_beyond_depth_cap_is_rejected() {
        let owner = Uuid::new_v4();
        let mut folders = MemoryFolders::default();
        let mut parent = None;
        for i in 0..=MAX_BREADCRUMB_DEPTH {
            parent = Some(folders.add(owner, &format!("level-{i}"), parent));
        }
        let deepest = parent.unwrap();
        let loose = folders.add(owner, "loose", None);

        let err = ensure_valid_destination(&folders, loose, deepest, owner)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("nested too deeply"));
    }
}
