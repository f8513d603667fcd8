// ABOUTME: Swift-style object store client over HTTP.
// ABOUTME: TempAuth v1 handshake, token-authenticated PUT/POST/HEAD/DELETE.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::path::Path;

use super::{ObjectMeta, ObjectStore, StoreError};
use crate::config::StoreAuth;
use crate::types::ObjectName;

const STORAGE_URL_HEADER: &str = "X-Storage-Url";
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const CONTAINER_READ_HEADER: &str = "X-Container-Read";

/// World-readable container ACL.
const PUBLIC_READ_ACL: &str = ".r:*";

/// Client for a Swift-compatible object store.
///
/// Authentication happens once, in `connect`; every subsequent operation
/// reuses the storage endpoint and token obtained there.
#[derive(Debug)]
pub struct SwiftStore {
    client: Client,
    storage_url: String,
    token: String,
}

impl SwiftStore {
    pub async fn connect(auth: &StoreAuth) -> Result<Self, StoreError> {
        match auth {
            StoreAuth::PreAuthorized { storage_url, token } => Ok(SwiftStore {
                client: Client::new(),
                storage_url: storage_url.clone(),
                token: token.clone(),
            }),
            StoreAuth::TempAuth {
                auth_url,
                user,
                key,
            } => {
                let client = Client::new();
                let resp = client
                    .get(auth_url)
                    .header("X-Auth-User", user.as_str())
                    .header("X-Auth-Key", key.as_str())
                    .send()
                    .await
                    .map_err(map_send_error)?;

                let status = resp.status();
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(StoreError::Auth(format!(
                        "auth endpoint rejected credentials ({status})"
                    )));
                }
                if !status.is_success() {
                    return Err(StoreError::Auth(format!(
                        "auth endpoint returned {status}"
                    )));
                }

                let storage_url = header_value(&resp, STORAGE_URL_HEADER).ok_or_else(|| {
                    StoreError::Auth(format!("auth response missing {STORAGE_URL_HEADER}"))
                })?;
                let token = header_value(&resp, AUTH_TOKEN_HEADER).ok_or_else(|| {
                    StoreError::Auth(format!("auth response missing {AUTH_TOKEN_HEADER}"))
                })?;

                Ok(SwiftStore {
                    client,
                    storage_url: storage_url.trim_end_matches('/').to_string(),
                    token,
                })
            }
        }
    }

    fn container_url(&self, container: &str) -> String {
        format!("{}/{}", self.storage_url, urlencoding::encode(container))
    }

    fn object_url(&self, container: &str, object: &ObjectName) -> String {
        format!(
            "{}/{}/{}",
            self.storage_url,
            urlencoding::encode(container),
            urlencoding::encode(object.as_str())
        )
    }
}

#[async_trait]
impl ObjectStore for SwiftStore {
    async fn upload(
        &self,
        local_path: &Path,
        container: &str,
        object: &ObjectName,
    ) -> Result<(), StoreError> {
        let body = tokio::fs::read(local_path).await?;
        let url = self.object_url(container, object);
        tracing::debug!("PUT {} ({} bytes)", url, body.len());

        let resp = self
            .client
            .put(&url)
            .header(AUTH_TOKEN_HEADER, self.token.as_str())
            .header("Content-Type", "application/gzip")
            .body(body)
            .send()
            .await
            .map_err(map_send_error)?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            status if is_auth_failure(status) => {
                Err(StoreError::Auth(format!("upload rejected ({status})")))
            }
            status if status == StatusCode::NOT_FOUND => {
                Err(StoreError::ContainerNotFound(container.to_string()))
            }
            status => Err(StoreError::Unexpected(format!(
                "upload returned {status}"
            ))),
        }
    }

    async fn grant_public_read(&self, container: &str) -> Result<(), StoreError> {
        let url = self.container_url(container);
        tracing::debug!("POST {} acl={}", url, PUBLIC_READ_ACL);

        let resp = self
            .client
            .post(&url)
            .header(AUTH_TOKEN_HEADER, self.token.as_str())
            .header(CONTAINER_READ_HEADER, PUBLIC_READ_ACL)
            .send()
            .await
            .map_err(map_send_error)?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            status if is_auth_failure(status) => Err(StoreError::PermissionDenied(format!(
                "container ACL update rejected ({status})"
            ))),
            status if status == StatusCode::NOT_FOUND => {
                Err(StoreError::ContainerNotFound(container.to_string()))
            }
            status => Err(StoreError::Unexpected(format!(
                "ACL update returned {status}"
            ))),
        }
    }

    async fn stat(&self, container: &str, object: &ObjectName) -> Result<ObjectMeta, StoreError> {
        let url = self.object_url(container, object);
        tracing::debug!("HEAD {}", url);

        let resp = self
            .client
            .head(&url)
            .header(AUTH_TOKEN_HEADER, self.token.as_str())
            .send()
            .await
            .map_err(map_send_error)?;

        match resp.status() {
            status if status.is_success() => {
                let content_length =
                    header_value(&resp, "Content-Length").and_then(|v| v.parse().ok());
                let etag = header_value(&resp, "Etag");
                Ok(ObjectMeta {
                    url: Some(url),
                    content_length,
                    etag,
                })
            }
            status if is_auth_failure(status) => {
                Err(StoreError::Auth(format!("stat rejected ({status})")))
            }
            status if status == StatusCode::NOT_FOUND => {
                Err(StoreError::ObjectNotFound(object.to_string()))
            }
            status => Err(StoreError::Unexpected(format!("stat returned {status}"))),
        }
    }

    async fn delete(&self, container: &str, object: &ObjectName) -> Result<(), StoreError> {
        let url = self.object_url(container, object);
        tracing::debug!("DELETE {}", url);

        let resp = self
            .client
            .delete(&url)
            .header(AUTH_TOKEN_HEADER, self.token.as_str())
            .send()
            .await
            .map_err(map_send_error)?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            // already gone: the cleanup goal is met
            status if status == StatusCode::NOT_FOUND => Ok(()),
            status if is_auth_failure(status) => {
                Err(StoreError::Auth(format!("delete rejected ({status})")))
            }
            status => Err(StoreError::Unexpected(format!(
                "delete returned {status}"
            ))),
        }
    }
}

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

fn map_send_error(e: reqwest::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

fn header_value(resp: &Response, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
