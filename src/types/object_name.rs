// ABOUTME: Deterministic archive object name shared by local file and remote copy.
// ABOUTME: Format: <app>_<commit>_<token>.tar.gz.

use std::fmt;

use super::{AppName, CommitId, UniqueToken};

/// Name of the uploaded archive, used both as the local file name under the
/// scratch directory and as the object name inside the store container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(String);

impl ObjectName {
    pub fn new(app: &AppName, commit: &CommitId, token: &UniqueToken) -> Self {
        Self(format!("{app}_{commit}_{token}.tar.gz"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
