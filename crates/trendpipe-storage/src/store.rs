use async_trait::async_trait;

use crate::error::StorageError;

/// Minimal object-store operations the pipeline needs.
///
/// Implementations must list keys in lexicographic order: the trigger's
/// last-seen-wins file selection is only deterministic under that contract
/// (S3 guarantees it; [`crate::MemoryObjectStore`] sorts to match).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all object keys under `prefix`, in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the listing fails.
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Fetch an object's full contents.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the key does not exist, or
    /// [`StorageError::Backend`] for any other failure.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write an object, overwriting any existing one at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the write fails.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    /// Copy an object to a new key within the same bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the source does not exist, or
    /// [`StorageError::Backend`] for any other failure.
    async fn copy(&self, bucket: &str, src_key: &str, dest_key: &str)
        -> Result<(), StorageError>;
}
