//! In-memory object store - covers are served back through the `/media` route.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::error::StorageError;
use postboard_core::ports::{MediaUrls, ObjectStore, StoredObject, validate_key};

/// Blob store using a HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    urls: MediaUrls,
}

impl InMemoryObjectStore {
    pub fn new(urls: MediaUrls) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            urls,
        }
    }

    /// Stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        tracing::debug!(key = %key, size = bytes.len(), "Stored object in memory");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        validate_key(key)?;
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.objects.write().await.remove(key);
        Ok(())
    }

    fn urls(&self) -> &MediaUrls {
        &self.urls
    }
}
