//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, Folder, FolderScope};
pub use tree::{FolderCrumb, FolderEdge, SearchScope};
