// ABOUTME: Object store trait seam for archive uploads.
// ABOUTME: Upload, container ACL grant, stat-based URL lookup, and delete.

mod error;
mod swift;

pub use error::StoreError;
pub use swift::SwiftStore;

use async_trait::async_trait;
use std::path::Path;

use crate::types::ObjectName;

/// Metadata reported by the store for an uploaded object.
#[derive(Debug, Clone, Default)]
pub struct ObjectMeta {
    /// Retrievable URL of the object. Absence after an apparently
    /// successful upload is treated as an upload-verification failure.
    pub url: Option<String>,

    pub content_length: Option<u64>,

    pub etag: Option<String>,
}

/// Operations the pipeline needs from an object store.
///
/// Uploads are retry-safe: writing the same object name twice overwrites.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file into the container under the given object name.
    async fn upload(
        &self,
        local_path: &Path,
        container: &str,
        object: &ObjectName,
    ) -> Result<(), StoreError>;

    /// Grant read-only access to all objects in the container. Required
    /// before any archive URL is handed to an external party: the deploy
    /// service fetches the archive unauthenticated.
    async fn grant_public_read(&self, container: &str) -> Result<(), StoreError>;

    /// Query object metadata after upload.
    async fn stat(&self, container: &str, object: &ObjectName) -> Result<ObjectMeta, StoreError>;

    /// Delete the remote copy. Deleting an already-absent object succeeds.
    async fn delete(&self, container: &str, object: &ObjectName) -> Result<(), StoreError>;
}
