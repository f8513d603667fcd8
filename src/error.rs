// ABOUTME: Application-wide error type with SNAFU pattern.
// ABOUTME: Unifies stage errors and exposes the failure taxonomy via kind().

use snafu::Snafu;

use crate::config::ConfigError;
use crate::deploy::PipelineError;
use crate::hook::HookError;
use crate::store::StoreError;
use crate::trigger::TriggerError;
use crate::types::AppNameError;

/// Unified error for everything that can sink a hook invocation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("configuration error: {source}"))]
    Config { source: ConfigError },

    #[snafu(display("cannot determine app from repository directory: {source}"))]
    Repository { source: AppNameError },

    #[snafu(display("push input error: {source}"))]
    Input { source: HookError },

    #[snafu(display("store connection failed: {source}"))]
    StoreConnect { source: StoreError },

    #[snafu(display("{source}"))]
    Pipeline { source: PipelineError },
}

/// Error kind for programmatic handling and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration missing or invalid.
    Config,
    /// No usable push data (or unusable repository directory).
    Input,
    /// The commit could not be archived.
    Archive,
    /// Upload, auth, or store verification failure.
    Upload,
    /// Container ACL grant denied.
    Permission,
    /// Deploy request transport failure.
    Trigger,
    /// Deploy request exceeded its deadline.
    TriggerTimeout,
    /// The remote deploy rejected the archive or answered ambiguously.
    DeploymentFailed,
}

impl Error {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. } => ErrorKind::Config,
            Error::Repository { .. } => ErrorKind::Input,
            Error::Input { .. } => ErrorKind::Input,
            Error::StoreConnect { source } => store_kind(source),
            Error::Pipeline { source } => match source {
                PipelineError::Archive(_) => ErrorKind::Archive,
                PipelineError::Store(e) => store_kind(e),
                PipelineError::Trigger(TriggerError::Timeout(_)) => ErrorKind::TriggerTimeout,
                PipelineError::Trigger(_) => ErrorKind::Trigger,
                PipelineError::DeploymentFailed { .. } => ErrorKind::DeploymentFailed,
            },
        }
    }
}

fn store_kind(source: &StoreError) -> ErrorKind {
    match source {
        StoreError::PermissionDenied(_) => ErrorKind::Permission,
        _ => ErrorKind::Upload,
    }
}

impl From<ConfigError> for Error {
    fn from(source: ConfigError) -> Self {
        Error::Config { source }
    }
}

impl From<AppNameError> for Error {
    fn from(source: AppNameError) -> Self {
        Error::Repository { source }
    }
}

impl From<HookError> for Error {
    fn from(source: HookError) -> Self {
        Error::Input { source }
    }
}

impl From<PipelineError> for Error {
    fn from(source: PipelineError) -> Self {
        Error::Pipeline { source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
