//! Dataroom workspaces.

pub mod service;

pub use service::DataroomService;
