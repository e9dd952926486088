//! Bucket client.

use async_trait::async_trait;
use s3::Bucket;
use s3::creds::Credentials;
use s3::region::Region;

use postboard_core::error::StorageError;
use postboard_core::ports::{MediaUrls, ObjectStore, StoredObject, validate_key};

use super::S3Config;

/// Object store backed by one bucket.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    urls: MediaUrls,
}

impl S3ObjectStore {
    /// Build the bucket client. No request is made here.
    pub fn new(config: &S3Config, urls: MediaUrls) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("Failed to create S3 credentials: {e}")))?;

        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse().unwrap_or(Region::UsEast1),
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(format!("Failed to create S3 bucket: {e}")))?;

        let bucket = if config.endpoint.is_some() {
            bucket.with_path_style()
        } else {
            bucket
        };

        tracing::info!(bucket = %config.bucket, "S3 object store configured");
        Ok(Self { bucket, urls })
    }
}

fn backend(err: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        tracing::debug!(key = %key, content_type = %content_type, "Uploading object to S3");

        let response = self
            .bucket
            .put_object_with_content_type(key, bytes, content_type)
            .await
            .map_err(backend)?;

        let status = response.status_code();
        if !is_success(status) {
            return Err(StorageError::Backend(format!(
                "upload of {key} failed with status {status}"
            )));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        validate_key(key)?;

        let response = match self.bucket.get_object(key).await {
            Ok(response) => response,
            Err(s3::error::S3Error::HttpFailWithBody(404, _)) => return Ok(None),
            Err(e) => return Err(backend(e)),
        };

        match response.status_code() {
            404 => Ok(None),
            status if is_success(status) => {
                let content_type = response
                    .headers()
                    .get("content-type")
                    .map_or("application/octet-stream", |v| v.as_str())
                    .to_string();
                Ok(Some(StoredObject {
                    bytes: response.bytes().to_vec(),
                    content_type,
                }))
            }
            status => Err(StorageError::Backend(format!(
                "download of {key} failed with status {status}"
            ))),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        tracing::debug!(key = %key, "Deleting S3 object");

        let response = self.bucket.delete_object(key).await.map_err(backend)?;
        let status = response.status_code();
        if is_success(status) || status == 404 {
            return Ok(());
        }
        Err(StorageError::Backend(format!(
            "delete of {key} failed with status {status}"
        )))
    }

    fn urls(&self) -> &MediaUrls {
        &self.urls
    }
}
