// ABOUTME: In-memory ObjectStore and DeployApi doubles for pipeline tests.
// ABOUTME: Record every call and fail on demand via preloaded errors.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use slipway::store::{ObjectMeta, ObjectStore, StoreError};
use slipway::trigger::{DeployApi, TriggerError};
use slipway::types::{AppName, CommitId, ObjectName};

/// Object store double. Calls are recorded; preloaded errors are consumed
/// by the next matching call.
#[derive(Default)]
pub struct MockStore {
    pub uploads: Mutex<Vec<(PathBuf, String, String)>>,
    pub grants: Mutex<Vec<String>>,
    pub stats: Mutex<Vec<(String, String)>>,
    pub deletes: Mutex<Vec<(String, String)>>,

    pub upload_error: Mutex<Option<StoreError>>,
    pub grant_error: Mutex<Option<StoreError>>,
    pub stat_error: Mutex<Option<StoreError>>,
    pub delete_error: Mutex<Option<StoreError>>,

    /// When true, stat answers with no URL field.
    pub stat_without_url: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn deleted_objects(&self) -> Vec<String> {
        self.deletes
            .lock()
            .unwrap()
            .iter()
            .map(|(_, object)| object.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn upload(
        &self,
        local_path: &Path,
        container: &str,
        object: &ObjectName,
    ) -> Result<(), StoreError> {
        if let Some(e) = self.upload_error.lock().unwrap().take() {
            return Err(e);
        }
        self.uploads.lock().unwrap().push((
            local_path.to_path_buf(),
            container.to_string(),
            object.to_string(),
        ));
        Ok(())
    }

    async fn grant_public_read(&self, container: &str) -> Result<(), StoreError> {
        if let Some(e) = self.grant_error.lock().unwrap().take() {
            return Err(e);
        }
        self.grants.lock().unwrap().push(container.to_string());
        Ok(())
    }

    async fn stat(&self, container: &str, object: &ObjectName) -> Result<ObjectMeta, StoreError> {
        if let Some(e) = self.stat_error.lock().unwrap().take() {
            return Err(e);
        }
        self.stats
            .lock()
            .unwrap()
            .push((container.to_string(), object.to_string()));

        let url = if self.stat_without_url {
            None
        } else {
            Some(format!("https://store.test/{container}/{object}"))
        };
        Ok(ObjectMeta {
            url,
            content_length: Some(4),
            etag: None,
        })
    }

    async fn delete(&self, container: &str, object: &ObjectName) -> Result<(), StoreError> {
        if let Some(e) = self.delete_error.lock().unwrap().take() {
            return Err(e);
        }
        self.deletes
            .lock()
            .unwrap()
            .push((container.to_string(), object.to_string()));
        Ok(())
    }
}

/// One recorded deploy trigger call.
#[derive(Debug, Clone)]
pub struct TriggerCall {
    pub app: String,
    pub archive_url: String,
    pub commit: String,
    pub log_path: PathBuf,
}

/// Deploy API double. Writes a canned body to the log, then optionally
/// fails (mimicking the real client, which logs whatever arrived before
/// the failure).
pub struct MockApi {
    pub calls: Mutex<Vec<TriggerCall>>,
    pub log_body: String,
    pub error: Mutex<Option<TriggerError>>,
}

impl MockApi {
    pub fn responding_with(log_body: &str) -> Self {
        MockApi {
            calls: Mutex::new(Vec::new()),
            log_body: log_body.to_string(),
            error: Mutex::new(None),
        }
    }

    pub fn failing_with(error: TriggerError) -> Self {
        MockApi {
            calls: Mutex::new(Vec::new()),
            log_body: String::new(),
            error: Mutex::new(Some(error)),
        }
    }
}

#[async_trait]
impl DeployApi for MockApi {
    async fn trigger(
        &self,
        app: &AppName,
        archive_url: &str,
        commit: &CommitId,
        log_path: &Path,
    ) -> Result<(), TriggerError> {
        self.calls.lock().unwrap().push(TriggerCall {
            app: app.to_string(),
            archive_url: archive_url.to_string(),
            commit: commit.to_string(),
            log_path: log_path.to_path_buf(),
        });

        std::fs::write(log_path, &self.log_body)?;

        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(())
    }
}
