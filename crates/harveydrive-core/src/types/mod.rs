//! Core type definitions used across the HarveyDrive workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
