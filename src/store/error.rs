// ABOUTME: Error types for object store operations.
// ABOUTME: Distinguishes auth, missing-container, and ACL permission failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store authentication failed: {0}")]
    Auth(String),

    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("permission denied updating container ACL: {0}")]
    PermissionDenied(String),

    #[error("store request failed: {0}")]
    Network(String),

    #[error("store reported no URL for {0}")]
    MissingUrl(String),

    #[error("unexpected store response: {0}")]
    Unexpected(String),

    #[error("failed to read local archive: {0}")]
    Io(#[from] std::io::Error),
}
