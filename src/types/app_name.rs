// ABOUTME: DNS-compatible application name validation.
// ABOUTME: Derived from the repository directory, with a trailing ".git" stripped.

use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppNameError {
    #[error("app name cannot be empty")]
    Empty,

    #[error("app name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("app name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("app name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("app name must be lowercase")]
    NotLowercase,

    #[error("invalid character in app name: '{0}'")]
    InvalidChar(char),

    #[error("repository path has no directory name: {0}")]
    NoDirectoryName(String),
}

/// Name of the application being deployed.
///
/// The deploy API addresses applications by DNS-label-style names, so the
/// same restrictions apply here: lowercase alphanumerics and hyphens, at
/// most 63 characters, no leading or trailing hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        if value.is_empty() {
            return Err(AppNameError::Empty);
        }

        if value.len() > 63 {
            return Err(AppNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(AppNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(AppNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(AppNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(AppNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    /// Derive the app name from a repository directory.
    ///
    /// Hook processes run with the bare repository as their working
    /// directory, named `<app>.git` by the hosting system. A plain `<app>`
    /// directory (non-bare checkout) is accepted too.
    pub fn from_repo_dir(dir: &Path) -> Result<Self, AppNameError> {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppNameError::NoDirectoryName(dir.display().to_string()))?;

        Self::new(name.strip_suffix(".git").unwrap_or(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        assert!(AppName::new("myapp").is_ok());
        assert!(AppName::new("my-app-2").is_ok());
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(matches!(AppName::new(""), Err(AppNameError::Empty)));
        assert!(matches!(
            AppName::new("-app"),
            Err(AppNameError::StartsWithHyphen)
        ));
        assert!(matches!(
            AppName::new("app-"),
            Err(AppNameError::EndsWithHyphen)
        ));
        assert!(matches!(
            AppName::new("MyApp"),
            Err(AppNameError::NotLowercase)
        ));
        assert!(matches!(
            AppName::new("my_app"),
            Err(AppNameError::InvalidChar('_'))
        ));
    }

    #[test]
    fn strips_git_suffix_from_directory() {
        let name = AppName::from_repo_dir(Path::new("/var/repositories/myapp.git")).unwrap();
        assert_eq!(name.as_str(), "myapp");
    }

    #[test]
    fn plain_directory_name_is_kept() {
        let name = AppName::from_repo_dir(Path::new("/srv/git/myapp")).unwrap();
        assert_eq!(name.as_str(), "myapp");
    }

    #[test]
    fn git_suffix_is_only_stripped_once() {
        // "myapp.git.git" strips to "myapp.git", which is not a valid name
        let err = AppName::from_repo_dir(Path::new("/srv/myapp.git.git")).unwrap_err();
        assert!(matches!(err, AppNameError::InvalidChar('.')));
    }
}
