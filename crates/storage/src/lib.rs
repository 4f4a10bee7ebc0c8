//! Object storage for uploaded photos.
//!
//! The rest of the workspace only sees the [`ObjectStore`] trait: one
//! write-only `put_object` call. [`S3ObjectStore`] is the production
//! implementation on top of `aws-sdk-s3`.

pub mod config;
pub mod error;
pub mod s3;

use async_trait::async_trait;

pub use config::StorageConfig;
pub use error::StorageError;
pub use s3::S3ObjectStore;

/// A remote object store that accepts writes.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `body` to `bucket` under `key`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;
}
