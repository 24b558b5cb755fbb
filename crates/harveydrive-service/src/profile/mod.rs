//! Local profiles mirrored from the auth provider.

pub mod service;

pub use service::ProfileService;
