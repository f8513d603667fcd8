// ABOUTME: Random per-invocation token embedded in archive and object names.
// ABOUTME: Freshly generated each run so concurrent pushes never collide.

use std::fmt;
use uuid::Uuid;

/// Collision-avoidance token for archive file and object names.
///
/// Generated fresh per invocation and never derived from the commit:
/// two concurrent pushes of the same commit (retried pushes included)
/// must still produce distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueToken(String);

impl UniqueToken {
    /// Generate a fresh token: 32 lowercase hex characters.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
