//! # harveydrive-storage
//!
//! Blob store implementations for HarveyDrive file bytes. Only the local
//! filesystem backend ships; others plug in through
//! [`harveydrive_core::traits::BlobStore`].

pub mod keys;
pub mod providers;

pub use keys::blob_key;
pub use providers::LocalBlobStore;
