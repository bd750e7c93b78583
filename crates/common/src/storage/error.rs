//! Error types for bucket operations.

use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Fetching temporary credentials failed
    #[error(transparent)]
    Credentials(#[from] ApiError),

    #[error("S3 Error: {message}")]
    Backend { code: &'static str, message: String },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("presigned URLs are not supported by this storage backend")]
    PresignUnsupported,

    #[error("no data bucket configured for this project")]
    MissingBucket,

    /// A copy succeeded but removing the source did not
    #[error("S3 Error during rename: {message}. The original file may still exist.")]
    PartialFailure { message: String },
}

impl StorageError {
    pub(crate) fn invalid_key(key: &str, reason: impl ToString) -> Self {
        Self::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        let code = match &err {
            object_store::Error::NotFound { path, .. } => return Self::NotFound(path.clone()),
            object_store::Error::Generic { store, .. } => *store,
            object_store::Error::InvalidPath { .. } => "InvalidPath",
            object_store::Error::NotSupported { .. } => "NotSupported",
            object_store::Error::NotImplemented => "NotImplemented",
            _ => "ObjectStore",
        };
        Self::Backend {
            code,
            message: err.to_string(),
        }
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
