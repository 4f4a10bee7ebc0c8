//! Storage configuration loaded from the environment.

use crate::error::StorageError;

/// Default public base URL, matching the bucket's region endpoint.
pub const DEFAULT_BASE_URL: &str = "https://s3.us-east-2.amazonaws.com/";

/// Default key prefix for uploaded objects.
pub const DEFAULT_KEY_PREFIX: &str = "catcollector";

/// Where photos are uploaded and how their public URLs are formed.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket receiving uploads.
    pub bucket: String,
    /// Public URL prefix; the photo URL is `<base_url><bucket>/<key>`.
    pub base_url: String,
    /// Folder-like prefix for every key.
    pub key_prefix: String,
    /// Region override. Falls back to the AWS provider chain when unset.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint_url: Option<String>,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                                |
    /// |-------------------|----------|----------------------------------------|
    /// | `S3_BUCKET`       | **yes**  | --                                     |
    /// | `S3_BASE_URL`     | no       | `https://s3.us-east-2.amazonaws.com/`  |
    /// | `S3_KEY_PREFIX`   | no       | `catcollector`                         |
    /// | `S3_REGION`       | no       | provider chain                         |
    /// | `S3_ENDPOINT_URL` | no       | AWS endpoint                           |
    pub fn from_env() -> Result<Self, StorageError> {
        let bucket = std::env::var("S3_BUCKET")
            .ok()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| StorageError::Config("S3_BUCKET must be set".into()))?;

        let mut base_url =
            std::env::var("S3_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let key_prefix =
            std::env::var("S3_KEY_PREFIX").unwrap_or_else(|_| DEFAULT_KEY_PREFIX.into());

        Ok(Self {
            bucket,
            base_url,
            key_prefix,
            region: optional_var("S3_REGION"),
            endpoint_url: optional_var("S3_ENDPOINT_URL"),
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
