// ABOUTME: Core value types for the deployment pipeline.
// ABOUTME: Validated app names, opaque commit ids, random tokens, object names.

mod app_name;
mod commit;
mod object_name;
mod token;

pub use app_name::{AppName, AppNameError};
pub use commit::CommitId;
pub use object_name::ObjectName;
pub use token::UniqueToken;
