//! Blob store trait for pluggable file byte storage.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// Location of a blob after it has been written.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredBlob {
    /// Store-relative key used for reads and deletes.
    pub key: String,
    /// Public URL the blob can be fetched from.
    pub url: String,
    /// Number of bytes written.
    pub size_bytes: u64,
}

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for blob storage backends holding file bytes.
///
/// The [`BlobStore`] trait is defined here in `harveydrive-core` and
/// implemented in `harveydrive-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the store can currently serve reads and writes.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes under the given key.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<StoredBlob>;

    /// Open a blob for streaming reads.
    async fn get(&self, key: &str) -> AppResult<ByteStream>;

    /// Delete a blob. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
