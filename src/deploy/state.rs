// ABOUTME: Pipeline state marker types for the type state pattern.
// ABOUTME: Each state carries exactly the data produced by the stage before it.

use std::path::PathBuf;

use crate::archive::ArchiveJob;

/// Initial state: the commit to deploy has been resolved from push input.
/// Available actions: `archive()`
#[derive(Debug)]
pub struct Resolved;

/// Archive written to the scratch directory.
/// Available actions: `upload()`
#[derive(Debug)]
pub struct Archived {
    pub(crate) job: ArchiveJob,
}

/// Remote copy exists in the store container.
/// Available actions: `grant_access()`
#[derive(Debug)]
pub struct Uploaded {
    pub(crate) job: ArchiveJob,
}

/// Container readable by the deploy service.
/// Available actions: `resolve_url()`
#[derive(Debug)]
pub struct AccessGranted {
    pub(crate) job: ArchiveJob,
}

/// Archive URL known (CDN concatenation or store stat).
/// Available actions: `trigger()`
#[derive(Debug)]
pub struct UrlResolved {
    pub(crate) archive_url: String,
}

/// Deploy service answered (or failed); its output is in the log file.
/// Available actions: `cleanup()`
#[derive(Debug)]
pub struct Triggered {
    pub(crate) log_path: PathBuf,
}

/// Local and remote archive copies released. Terminal apart from the
/// outcome check.
#[derive(Debug)]
pub struct CleanedUp {
    pub(crate) log_path: PathBuf,
}
