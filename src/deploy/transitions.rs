// ABOUTME: State transition methods for the deployment pipeline.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::path::Path;

use crate::archive::{self, ArchiveJob};
use crate::store::{ObjectStore, StoreError};
use crate::trigger::DeployApi;

use super::Pipeline;
use super::error::PipelineError;
use super::state::{
    AccessGranted, Archived, CleanedUp, Resolved, Triggered, Uploaded, UrlResolved,
};

/// Result type for transitions: the failed pipeline comes back with the
/// error so the caller can release whatever artifacts were created.
pub type TransitionResult<T, S> = Result<Pipeline<T>, (Pipeline<S>, PipelineError)>;

impl<S> Pipeline<S> {
    /// Internal helper to move to a new state, keeping the shared body.
    fn map_state<T>(self, f: impl FnOnce(S) -> T) -> Pipeline<T> {
        let Pipeline {
            config,
            app,
            commit,
            artifacts,
            state,
        } = self;
        Pipeline {
            config,
            app,
            commit,
            artifacts,
            state: f(state),
        }
    }
}

impl Pipeline<Resolved> {
    /// Archive the resolved commit into the scratch directory.
    pub async fn archive(mut self, repo_dir: &Path) -> TransitionResult<Archived, Resolved> {
        let job = ArchiveJob::new(&self.config.tmp_dir, self.app.clone(), self.commit.clone());

        match archive::create_archive(repo_dir, &job).await {
            Ok(()) => {
                self.artifacts.local = Some(job.path().to_path_buf());
                Ok(self.map_state(|_| Archived { job }))
            }
            Err(e) => {
                // git may have left a partial file behind
                if job.path().exists() {
                    self.artifacts.local = Some(job.path().to_path_buf());
                }
                Err((self, e.into()))
            }
        }
    }
}

impl Pipeline<Archived> {
    /// Push the archive into the store container under its object name.
    pub async fn upload<St: ObjectStore>(
        mut self,
        store: &St,
    ) -> TransitionResult<Uploaded, Archived> {
        let result = store
            .upload(
                self.state.job.path(),
                &self.config.container,
                self.state.job.object(),
            )
            .await;

        match result {
            Ok(()) => {
                self.artifacts.remote = Some(self.state.job.object().clone());
                Ok(self.map_state(|Archived { job }| Uploaded { job }))
            }
            Err(e) => Err((self, e.into())),
        }
    }
}

impl Pipeline<Uploaded> {
    /// Open the container for public reads.
    ///
    /// Must happen before any URL is handed out: a CDN-resolved URL is
    /// unauthenticated and 404s against a private container. When access
    /// granting is disabled by configuration the container is expected to
    /// be readable already; the state transition still happens.
    pub async fn grant_access<St: ObjectStore>(
        self,
        store: &St,
    ) -> TransitionResult<AccessGranted, Uploaded> {
        if self.config.grant_public_access {
            if let Err(e) = store.grant_public_read(&self.config.container).await {
                return Err((self, e.into()));
            }
        }

        Ok(self.map_state(|Uploaded { job }| AccessGranted { job }))
    }
}

impl Pipeline<AccessGranted> {
    /// Determine the URL the deploy service will fetch the archive from.
    ///
    /// With a CDN base configured this is pure concatenation, no network
    /// call. Otherwise the store is queried and its reported URL is used;
    /// a missing URL counts as an upload-verification failure.
    pub async fn resolve_url<St: ObjectStore>(
        self,
        store: &St,
    ) -> TransitionResult<UrlResolved, AccessGranted> {
        let archive_url = match self.config.cdn_url.clone() {
            Some(base) => format!("{}/{}", base, self.state.job.object()),
            None => {
                let meta = match store
                    .stat(&self.config.container, self.state.job.object())
                    .await
                {
                    Ok(meta) => meta,
                    Err(e) => return Err((self, e.into())),
                };

                match meta.url {
                    Some(url) => url,
                    None => {
                        let object = self.state.job.object().to_string();
                        return Err((self, StoreError::MissingUrl(object).into()));
                    }
                }
            }
        };

        Ok(self.map_state(|_| UrlResolved { archive_url }))
    }
}

impl Pipeline<UrlResolved> {
    pub fn archive_url(&self) -> &str {
        &self.state.archive_url
    }

    /// Fire the deploy request and capture its output in the log file.
    ///
    /// Timeouts and transport failures come back like any other stage
    /// error; the caller proceeds to cleanup either way, and the log file
    /// (possibly empty) stays behind.
    pub async fn trigger<A: DeployApi>(self, api: &A) -> TransitionResult<Triggered, UrlResolved> {
        let log_path = self.config.log_path(&self.app);

        match api
            .trigger(&self.app, &self.state.archive_url, &self.commit, &log_path)
            .await
        {
            Ok(()) => Ok(self.map_state(|_| Triggered { log_path })),
            Err(e) => Err((self, e.into())),
        }
    }
}

impl Pipeline<Triggered> {
    /// Release the local archive and the remote copy. Failures are logged
    /// and swallowed; the deploy log is intentionally left behind.
    pub async fn cleanup<St: ObjectStore>(mut self, store: &St) -> Pipeline<CleanedUp> {
        let _ = self.release_artifacts(store).await;

        self.map_state(|Triggered { log_path }| CleanedUp { log_path })
    }
}
