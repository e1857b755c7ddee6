//! In-memory object store for tests and local development.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::store::ObjectStore;

/// An [`ObjectStore`] backed by a `BTreeMap`, so listings come out in
/// lexicographic key order exactly like S3's.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
}

impl MemoryObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object, overwriting any existing one.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, bucket: &str, key: &str, data: Vec<u8>) {
        self.objects
            .lock()
            .expect("memory store lock poisoned")
            .insert((bucket.to_string(), key.to_string()), data);
    }

    /// Whether an object exists.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .lock()
            .expect("memory store lock poisoned")
            .contains_key(&(bucket.to_string(), key.to_string()))
    }

    /// Number of stored objects across all buckets.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .expect("memory store lock poisoned")
            .len()
    }

    /// Whether the store holds no objects.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
        let objects = self
            .objects
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(objects
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let objects = self
            .objects
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{bucket}/{key}")))
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        objects.insert((bucket.to_string(), key.to_string()), data);
        Ok(())
    }

    async fn copy(
        &self,
        bucket: &str,
        src_key: &str,
        dest_key: &str,
    ) -> Result<(), StorageError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let data = objects
            .get(&(bucket.to_string(), src_key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{bucket}/{src_key}")))?;
        objects.insert((bucket.to_string(), dest_key.to_string()), data);
        Ok(())
    }
}
