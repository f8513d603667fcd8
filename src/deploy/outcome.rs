// ABOUTME: Final verdict read from the deploy log's last line.
// ABOUTME: Exact-match "OK" contract with the remote deploy service.

use super::Pipeline;
use super::state::CleanedUp;

/// The literal the deploy service prints as its final line on success.
///
/// This exact-match check is the compatibility contract with the remote
/// API; do not loosen it into a status-code or prefix check.
pub const SUCCESS_MARKER: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed { last_line: Option<String> },
}

/// Check captured deploy output: success iff the last line is exactly
/// `OK`. An empty log has no last line and fails.
pub fn check_log(content: &str) -> Outcome {
    match content.lines().last() {
        Some(line) if line == SUCCESS_MARKER => Outcome::Success,
        last => Outcome::Failed {
            last_line: last.map(str::to_string),
        },
    }
}

impl Pipeline<CleanedUp> {
    /// Read the deploy log and derive the pipeline verdict. An unreadable
    /// log is a failure, not an error: the contract knows only pass/fail.
    pub async fn outcome(&self) -> Outcome {
        match tokio::fs::read_to_string(&self.state.log_path).await {
            Ok(content) => check_log(&content),
            Err(e) => {
                tracing::warn!(
                    "failed to read deploy log {}: {}",
                    self.state.log_path.display(),
                    e
                );
                Outcome::Failed { last_line: None }
            }
        }
    }
}
