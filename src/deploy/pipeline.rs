// ABOUTME: Generic pipeline struct parameterized by state marker.
// ABOUTME: Tracks created artifacts so cleanup can run from any state.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::store::ObjectStore;
use crate::types::{AppName, CommitId, ObjectName};

use super::state::{CleanedUp, Resolved, Triggered};

/// Resources created so far, in creation order.
///
/// Populated by the transitions as soon as a resource exists, so a failure
/// mid-stage still releases everything that made it to disk or the store.
#[derive(Debug, Default)]
pub struct Artifacts {
    pub(crate) local: Option<PathBuf>,
    pub(crate) remote: Option<ObjectName>,
}

/// What cleanup managed to release. Failures are logged, never escalated:
/// cleanup must not mask the pipeline's primary result.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub local_removed: bool,
    pub remote_removed: bool,
}

/// A deployment pipeline run, parameterized by its current state.
///
/// Transitions consume `self` and return the next state on success, or the
/// unchanged pipeline alongside the error so the caller can always release
/// the artifacts that were created.
#[derive(Debug)]
pub struct Pipeline<S> {
    pub(crate) config: Config,
    pub(crate) app: AppName,
    pub(crate) commit: CommitId,
    pub(crate) artifacts: Artifacts,
    pub(crate) state: S,
}

impl Pipeline<Resolved> {
    pub fn new(config: Config, app: AppName, commit: CommitId) -> Self {
        Pipeline {
            config,
            app,
            commit,
            artifacts: Artifacts::default(),
            state: Resolved,
        }
    }
}

impl<S> Pipeline<S> {
    pub fn app(&self) -> &AppName {
        &self.app
    }

    pub fn commit(&self) -> &CommitId {
        &self.commit
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Best-effort release of whatever artifacts exist; the failure path's
    /// counterpart to `cleanup()`. Never fails.
    pub async fn release<St: ObjectStore>(mut self, store: &St) -> CleanupReport {
        self.release_artifacts(store).await
    }

    pub(crate) async fn release_artifacts<St: ObjectStore>(
        &mut self,
        store: &St,
    ) -> CleanupReport {
        let mut report = CleanupReport::default();

        if let Some(path) = self.artifacts.local.take() {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => report.local_removed = true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    report.local_removed = true;
                }
                Err(e) => {
                    tracing::warn!("failed to remove local archive {}: {}", path.display(), e);
                }
            }
        }

        if let Some(object) = self.artifacts.remote.take() {
            match store.delete(&self.config.container, &object).await {
                Ok(()) => report.remote_removed = true,
                Err(e) => {
                    tracing::warn!("failed to delete remote archive {}: {}", object, e);
                }
            }
        }

        report
    }
}

impl Pipeline<Triggered> {
    pub fn log_path(&self) -> &Path {
        &self.state.log_path
    }
}

impl Pipeline<CleanedUp> {
    pub fn log_path(&self) -> &Path {
        &self.state.log_path
    }
}
