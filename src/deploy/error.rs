// ABOUTME: Error type for pipeline stage failures.
// ABOUTME: Wraps archive, store, and trigger errors plus the final verdict.

use crate::archive::ArchiveError;
use crate::store::StoreError;
use crate::trigger::TriggerError;

/// Errors that can occur during pipeline state transitions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Archiving the commit failed.
    #[error("archive failed: {0}")]
    Archive(#[from] ArchiveError),

    /// Object store operation failed (upload, ACL grant, stat).
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    /// Deploy trigger failed or timed out.
    #[error("deploy trigger failed: {0}")]
    Trigger(#[from] TriggerError),

    /// The remote deploy ran but did not end its log with the success
    /// marker.
    #[error("deployment failed, last log line: {last_line:?}")]
    DeploymentFailed { last_line: Option<String> },
}
