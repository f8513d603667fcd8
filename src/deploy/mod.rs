// ABOUTME: Pipeline orchestration using the type state pattern.
// ABOUTME: Exports state markers, Pipeline struct, and the outcome check.

mod error;
mod outcome;
mod pipeline;
mod state;
mod transitions;

pub use error::PipelineError;
pub use outcome::{Outcome, SUCCESS_MARKER, check_log};
pub use pipeline::{Artifacts, CleanupReport, Pipeline};
pub use state::{
    AccessGranted, Archived, CleanedUp, Resolved, Triggered, Uploaded, UrlResolved,
};
pub use transitions::TransitionResult;
