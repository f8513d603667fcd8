// ABOUTME: Opaque commit identifier taken from the push input.
// ABOUTME: No format validation; unknown revisions surface when archiving.

use std::fmt;

/// A revision as reported by the hosting system on the hook's stdin.
///
/// The value is deliberately unvalidated. Whether it names a real commit is
/// only known to the repository, and `git archive` is the authority on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
