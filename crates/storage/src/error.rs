/// Errors raised by object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The remote store rejected or failed the upload.
    #[error("Upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },

    /// The object key is empty or otherwise unusable.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Required storage configuration is missing or malformed.
    #[error("Storage configuration error: {0}")]
    Config(String),
}
