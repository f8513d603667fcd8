// ABOUTME: Pre-receive hook input parsing.
// ABOUTME: Resolves the commit to deploy from revision triples on stdin.

use std::io::BufRead;
use thiserror::Error;

use crate::types::CommitId;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("no push data received on stdin")]
    EmptyInput,

    #[error("malformed push line: {0:?}")]
    Malformed(String),

    #[error("failed to read push input: {0}")]
    Io(#[from] std::io::Error),
}

/// One revision triple as delivered by the hosting system, one per line:
/// `<old-revision> <new-revision> <ref-name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    pub old_revision: String,
    pub new_revision: CommitId,
    pub ref_name: String,
}

impl PushEvent {
    pub fn parse(line: &str) -> Result<Self, HookError> {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(old), Some(new), Some(ref_name)) => Ok(PushEvent {
                old_revision: old.to_string(),
                new_revision: CommitId::new(new),
                ref_name: ref_name.to_string(),
            }),
            _ => Err(HookError::Malformed(line.to_string())),
        }
    }
}

/// Resolve the commit to archive from the hook's input stream.
///
/// Multi-ref pushes deliver several triples; the last one wins. Implemented
/// as a fold over the line sequence so the "last value seen" is the fold's
/// result rather than a mutable outer variable.
pub fn resolve_push<R: BufRead>(input: R) -> Result<CommitId, HookError> {
    let last = input.lines().try_fold(None, |acc, line| {
        let line = line?;
        if line.trim().is_empty() {
            return Ok::<_, HookError>(acc);
        }
        Ok(Some(PushEvent::parse(&line)?))
    })?;

    last.map(|event| event.new_revision)
        .ok_or(HookError::EmptyInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_triple() {
        let event = PushEvent::parse("a1 b2 refs/heads/master").unwrap();
        assert_eq!(event.old_revision, "a1");
        assert_eq!(event.new_revision.as_str(), "b2");
        assert_eq!(event.ref_name, "refs/heads/master");
    }

    #[test]
    fn rejects_short_lines() {
        assert!(matches!(
            PushEvent::parse("a1 b2"),
            Err(HookError::Malformed(_))
        ));
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let event = PushEvent::parse("  a1   b2   refs/heads/dev ").unwrap();
        assert_eq!(event.new_revision.as_str(), "b2");
    }
}
