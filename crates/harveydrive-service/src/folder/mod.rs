//! Folder services: CRUD, breadcrumbs and subtree resolution.

pub mod ancestry;
pub mod descendants;
pub mod service;

pub use ancestry::{
    Ancestry, FolderLookup, MAX_BREADCRUMB_DEPTH, ensure_valid_destination, resolve_ancestry,
};
pub use descendants::{collect_descendants, collect_search_scope};
pub use service::{CreateFolderRequest, FolderListQuery, FolderService};
