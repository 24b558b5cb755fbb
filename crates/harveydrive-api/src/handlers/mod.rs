//! HTTP request handlers, one module per resource.

pub mod dataroom;
pub mod file;
pub mod folder;
pub mod health;
pub mod profile;
pub mod share;
