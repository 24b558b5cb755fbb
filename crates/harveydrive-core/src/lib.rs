//! # harveydrive-core
//!
//! Core crate for HarveyDrive. Contains the configuration schemas, the
//! blob store trait, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other HarveyDrive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
