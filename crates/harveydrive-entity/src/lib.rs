//! # harveydrive-entity
//!
//! Domain entity models for HarveyDrive. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod dataroom;
pub mod file;
pub mod folder;
pub mod profile;
pub mod share;
