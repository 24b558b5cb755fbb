//! # harveydrive-service
//!
//! Business logic service layer for HarveyDrive. Each service orchestrates
//! repositories and the blob store to implement one group of use cases;
//! the naming and folder-path rules live in [`naming`] and [`folder`].
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

mod blob_cleanup;
pub mod context;
pub mod dataroom;
pub mod file;
pub mod folder;
pub mod naming;
pub mod profile;
pub mod share;

pub use context::RequestContext;
pub use dataroom::DataroomService;
pub use file::{FileService, SearchService, UploadService};
pub use folder::FolderService;
pub use profile::ProfileService;
pub use share::{LinkService, ShareService};
