//! Object store port - blob storage for uploaded cover images.

use async_trait::async_trait;

use crate::error::StorageError;

/// An object read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Maps object keys to publicly fetchable URLs and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    base: String,
}

impl MediaUrls {
    /// `base` is either an absolute URL (CDN, bucket website) or a path such as `/media`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base, key)
    }

    /// Recover the key from a URL produced by [`MediaUrls::url_for`].
    pub fn key_for(&self, url: &str) -> Option<String> {
        let key = url.strip_prefix(&self.base)?.strip_prefix('/')?;
        validate_key(key).ok()?;
        Some(key.to_string())
    }
}

/// Reject keys that are empty, absolute, or escape their namespace.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");

    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Object store trait - abstraction over blob backends (S3, in-memory).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, replacing any previous one under the same key.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Read an object back. `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError>;

    /// Remove an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// URL scheme of this store.
    fn urls(&self) -> &MediaUrls;

    /// Publicly fetchable URL of a key.
    fn public_url(&self, key: &str) -> String {
        self.urls().url_for(key)
    }

    /// The key behind a URL, if the URL points into this store.
    fn key_for_url(&self, url: &str) -> Option<String> {
        self.urls().key_for(url)
    }
}
