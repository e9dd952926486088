//! S3-compatible object store (AWS S3, MinIO, R2) via `rust-s3`.

#[cfg(feature = "s3")]
mod bucket;

#[cfg(feature = "s3")]
pub use bucket::S3ObjectStore;

/// Connection settings for the cover bucket.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for MinIO, R2 and friends. Switches to path-style addressing.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl S3Config {
    /// Direct URL of the bucket, for deployments that serve covers straight from it.
    pub fn bucket_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket),
            None => format!("https://{}.s3.amazonaws.com", self.bucket),
        }
    }
}
