//! File management services: CRUD, upload, download and search.

pub mod mime;
pub mod search;
pub mod service;
pub mod upload;

pub use search::{SearchRequest, SearchService};
pub use service::{FileListQuery, FileService};
pub use upload::{UploadParams, UploadService};
