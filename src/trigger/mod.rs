// ABOUTME: Deploy API client: one authenticated POST per push.
// ABOUTME: Streams the response body to the per-app log under a hard timeout.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::types::{AppName, CommitId};

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("deploy request timed out after {0} seconds")]
    Timeout(u64),

    #[error("deploy request failed: {0}")]
    Transport(String),

    #[error("failed to write deploy log: {0}")]
    Log(#[from] std::io::Error),
}

/// The single call the pipeline makes against the deploy service.
#[async_trait]
pub trait DeployApi: Send + Sync {
    /// Ask the deploy service to clone and deploy the archive, streaming
    /// everything it says into `log_path`.
    async fn trigger(
        &self,
        app: &AppName,
        archive_url: &str,
        commit: &CommitId,
        log_path: &Path,
    ) -> Result<(), TriggerError>;
}

/// HTTP implementation against a tsuru-style deploy API.
pub struct HttpDeployApi {
    client: Client,
    host: String,
    token: String,
    timeout: Duration,
}

impl HttpDeployApi {
    pub fn new(host: String, token: String, timeout: Duration) -> Self {
        HttpDeployApi {
            client: Client::new(),
            host,
            token,
            timeout,
        }
    }
}

#[async_trait]
impl DeployApi for HttpDeployApi {
    async fn trigger(
        &self,
        app: &AppName,
        archive_url: &str,
        commit: &CommitId,
        log_path: &Path,
    ) -> Result<(), TriggerError> {
        // Truncate the log up front: a transport failure must still leave a
        // (possibly empty) log behind for the operator.
        let mut log = tokio::fs::File::create(log_path).await?;

        let url = format!("{}/apps/{}/repository/clone", self.host, app);
        let body = format!(
            "archive-url={}&commit={}",
            urlencoding::encode(archive_url),
            urlencoding::encode(commit.as_str())
        );
        tracing::debug!("POST {}", url);

        let request = async {
            let resp = self
                .client
                .post(&url)
                .header(AUTHORIZATION, format!("bearer {}", self.token))
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body)
                .send()
                .await
                .map_err(|e| TriggerError::Transport(e.to_string()))?;

            // The HTTP status is deliberately not inspected. The deploy
            // service signals success only through the final log line, and
            // that contract is checked downstream.
            let mut stream = resp.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk: Bytes = chunk.map_err(|e| TriggerError::Transport(e.to_string()))?;
                log.write_all(&chunk).await?;
            }
            log.flush().await?;
            Ok(())
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(TriggerError::Timeout(self.timeout.as_secs())),
        }
    }
}
