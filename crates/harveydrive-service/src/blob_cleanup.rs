//! Removal of blobs whose rows have already been deleted.

use tracing::warn;

use harveydrive_core::traits::BlobStore;

/// Delete every key, logging failures instead of returning them.
///
/// Callers delete the owning rows first; a failure here leaves an orphaned
/// blob. Returns the number of keys that could not be removed.
pub(crate) async fn purge_blobs(blobs: &dyn BlobStore, keys: &[String]) -> usize {
    let mut failed = 0;
    for key in keys {
        if let Err(e) = blobs.delete(key).await {
            failed += 1;
            warn!(key = %key, error = %e, "Failed to remove blob; leaving it orphaned");
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use harveydrive_core::error::AppError;
    use harveydrive_core::result::AppResult;
    use harveydrive_core::traits::{ByteStream, StoredBlob};

    use super::*;

    /// Records deletes and fails the ones listed in `failing`.
    #[derive(Debug, Default)]
    struct FlakyBlobs {
        failing: HashSet<String>,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BlobStore for FlakyBlobs {
        fn provider_type(&self) -> &str {
            "flaky"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(self.failing.is_empty())
        }

        async fn put(&self, key: &str, data: Bytes) -> AppResult<StoredBlob> {
            Ok(StoredBlob {
                key: key.to_string(),
                url: format!("memory://{key}"),
                size_bytes: data.len() as u64,
            })
        }

        async fn get(&self, key: &str) -> AppResult<ByteStream> {
            Err(AppError::not_found(format!("Blob not found: {key}")))
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            if self.failing.contains(key) {
                return Err(AppError::storage(format!("Failed to delete blob: {key}")));
            }
            self.deleted.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test]
    async fn test_purge_removes_every_key() {
        let blobs = FlakyBlobs::default();

        let failed = purge_blobs(&blobs, &keys(&["u/1-a.txt", "u/2-b.txt"])).await;

        assert_eq!(failed, 0);
        assert_eq!(*blobs.deleted.lock().unwrap(), keys(&["u/1-a.txt", "u/2-b.txt"]));
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_stop_the_sweep() {
        let blobs = FlakyBlobs {
            failing: ["u/2-b.txt".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let failed = purge_blobs(&blobs, &keys(&["u/1-a.txt", "u/2-b.txt", "u/3-c.txt"])).await;

        assert_eq!(failed, 1);
        assert_eq!(*blobs.deleted.lock().unwrap(), keys(&["u/1-a.txt", "u/3-c.txt"]));
    }

    #[tokio::test]
    async fn test_nothing_to_purge() {
        let blobs = FlakyBlobs::default();
        assert_eq!(purge_blobs(&blobs, &[]).await, 0);
        assert!(blobs.deleted.lock().unwrap().is_empty());
    }
}
