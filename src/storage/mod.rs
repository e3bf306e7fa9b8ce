// ABOUTME: Object store capability trait and its error type.
// ABOUTME: The sync engine talks to remote storage only through ObjectStore.

mod s3;

pub use s3::S3Store;

use async_trait::async_trait;
use bytes::Bytes;

use crate::types::BucketName;

/// Maximum number of keys accepted by one batch delete request.
pub const DELETE_BATCH_SIZE: usize = 1000;

/// An object in the remote inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    /// Object key relative to the bucket root.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// Entity tag without surrounding quotes. For single-part uploads this
    /// is the hex MD5 of the content.
    pub etag: Option<String>,
}

/// Remote object storage operations.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every object in the bucket.
    async fn list_objects(&self, bucket: &BucketName) -> Result<Vec<RemoteObject>, StoreError>;

    /// Create or replace an object.
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// Delete up to [`DELETE_BATCH_SIZE`] objects in one request.
    ///
    /// Keys that the store refused to delete are reported through
    /// [`StoreError::Rejected`].
    async fn delete_objects(&self, bucket: &BucketName, keys: &[String])
    -> Result<(), StoreError>;
}

/// Errors from object store operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("temporary failure: {0}")]
    Transient(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("{} object(s) could not be deleted", .0.len())]
    Rejected(Vec<RejectedKey>),
}

impl StoreError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

/// A key the store refused to delete, with the reason it gave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedKey {
    pub key: String,
    pub reason: String,
}

/// Strip the quotes S3 puts around entity tags.
pub fn normalize_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}
