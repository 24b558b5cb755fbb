//! Sharing: per-user grants and public tokenized links.

pub mod link;
pub mod service;

pub use link::LinkService;
pub use service::{CreateShareRequest, ShareService, SharedLink};
