// ABOUTME: Commit archiving via git into the shared scratch directory.
// ABOUTME: Names archives <app>_<commit>_<token>.tar.gz, token fresh per run.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

use crate::types::{AppName, CommitId, ObjectName, UniqueToken};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("commit {commit} does not exist in this repository: {detail}")]
    BadCommit { commit: CommitId, detail: String },

    #[error("git archive failed with status {status:?}: {stderr}")]
    Git {
        status: Option<i32>,
        stderr: String,
    },

    #[error("failed to write archive: {0}")]
    Io(#[from] std::io::Error),
}

/// One archive to produce: which commit, and where the file goes.
///
/// The path always lands under the scratch directory and is unique per
/// invocation because the token is.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    repository: AppName,
    commit: CommitId,
    object: ObjectName,
    path: PathBuf,
}

impl ArchiveJob {
    pub fn new(tmp_dir: &Path, repository: AppName, commit: CommitId) -> Self {
        let token = UniqueToken::generate();
        let object = ObjectName::new(&repository, &commit, &token);
        let path = tmp_dir.join(object.as_str());
        ArchiveJob {
            repository,
            commit,
            object,
            path,
        }
    }

    pub fn repository(&self) -> &AppName {
        &self.repository
    }

    pub fn commit(&self) -> &CommitId {
        &self.commit
    }

    pub fn object(&self) -> &ObjectName {
        &self.object
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Produce a compressed tar archive of the job's commit.
///
/// Delegates to `git archive`, which is the authority on whether the
/// revision exists. Its stderr is preserved in the error for the pusher.
pub async fn create_archive(repo_dir: &Path, job: &ArchiveJob) -> Result<(), ArchiveError> {
    let output = Command::new("git")
        .arg("archive")
        .arg("--format=tar.gz")
        .arg("-o")
        .arg(job.path())
        .arg(job.commit().as_str())
        .current_dir(repo_dir)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.to_lowercase().contains("not a valid object name")
        || stderr.to_lowercase().contains("unknown revision")
    {
        return Err(ArchiveError::BadCommit {
            commit: job.commit().clone(),
            detail: stderr,
        });
    }

    Err(ArchiveError::Git {
        status: output.status.code(),
        stderr,
    })
}
