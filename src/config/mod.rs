// ABOUTME: Environment-sourced configuration for the hook process.
// ABOUTME: Store credentials, deploy API endpoint, CDN base, and tunables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::types::AppName;

/// Default hard wall-clock limit on the deploy trigger request.
pub const DEFAULT_DEPLOY_TIMEOUT: Duration = Duration::from_secs(1800);

/// Default directory for the per-app deploy log.
pub const DEFAULT_LOG_DIR: &str = "/tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    #[error("set either AUTH_URL/AUTH_PARAMS or STORAGE_URL/STORAGE_TOKEN, not both")]
    ConflictingStoreAuth,
}

/// How the object store client obtains its storage endpoint and token.
///
/// The two modes are mutually exclusive, mirroring the CDN/stat split for
/// URL resolution: either the client authenticates itself against a
/// TempAuth endpoint, or the operator wires in a pre-authenticated
/// endpoint and token directly.
#[derive(Debug, Clone)]
pub enum StoreAuth {
    TempAuth {
        auth_url: String,
        user: String,
        key: String,
    },
    PreAuthorized {
        storage_url: String,
        token: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Object store container receiving the archives.
    pub container: String,

    /// CDN base URL. When set, archive URLs are built by concatenation and
    /// the store is never queried for them.
    pub cdn_url: Option<String>,

    /// Deploy API base URL.
    pub tsuru_host: String,

    /// Bearer token for the deploy API.
    pub tsuru_token: String,

    pub store_auth: StoreAuth,

    /// Whether to open the container for public reads after upload.
    pub grant_public_access: bool,

    pub deploy_timeout: Duration,

    pub log_dir: PathBuf,

    /// Scratch directory for local archives.
    pub tmp_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let container = required("CONTAINER_NAME")?;
        let cdn_url = optional("CDN_URL").map(|url| trim_url(&url));
        let tsuru_host = trim_url(&required("TSURU_HOST")?);
        let tsuru_token = required("TSURU_TOKEN")?;

        let store_auth = store_auth_from_env()?;

        let grant_public_access = match optional("GRANT_PUBLIC_ACCESS") {
            None => true,
            Some(raw) => parse_bool("GRANT_PUBLIC_ACCESS", &raw)?,
        };

        let deploy_timeout = match optional("DEPLOY_TIMEOUT") {
            None => DEFAULT_DEPLOY_TIMEOUT,
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "DEPLOY_TIMEOUT".to_string(),
                    reason: format!("expected seconds, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
        };

        let log_dir = optional("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        let tmp_dir = optional("TMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        Ok(Config {
            container,
            cdn_url,
            tsuru_host,
            tsuru_token,
            store_auth,
            grant_public_access,
            deploy_timeout,
            log_dir,
            tmp_dir,
        })
    }

    /// Path of the deploy log for an app. One file per app, overwritten on
    /// every run; intentionally left behind for operator inspection.
    pub fn log_path(&self, app: &AppName) -> PathBuf {
        self.log_dir.join(format!("deploy-{app}.log"))
    }
}

fn store_auth_from_env() -> Result<StoreAuth, ConfigError> {
    let auth_url = optional("AUTH_URL");
    let storage_url = optional("STORAGE_URL");

    match (auth_url, storage_url) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingStoreAuth),
        (Some(auth_url), None) => {
            let params = required("AUTH_PARAMS")?;
            let (user, key) =
                params
                    .split_once(':')
                    .ok_or_else(|| ConfigError::InvalidValue {
                        var: "AUTH_PARAMS".to_string(),
                        reason: "expected user:key".to_string(),
                    })?;
            Ok(StoreAuth::TempAuth {
                auth_url: trim_url(&auth_url),
                user: user.to_string(),
                key: key.to_string(),
            })
        }
        (None, Some(storage_url)) => Ok(StoreAuth::PreAuthorized {
            storage_url: trim_url(&storage_url),
            token: required("STORAGE_TOKEN")?,
        }),
        (None, None) => Err(ConfigError::MissingEnvVar("AUTH_URL".to_string())),
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// An empty value is treated as unset, matching the `[ -z "$VAR" ]` checks
/// the hook environment historically used.
fn optional(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            reason: format!("expected a boolean, got {raw:?}"),
        }),
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
