//! Error types for pr-ci-watch

use thiserror::Error;

/// Errors that can occur while watching pull requests
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Authentication token missing or unusable
    #[error("authentication error: {0}")]
    Auth(String),

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// External notifier could not be run or reported failure
    #[error("notifier error: {0}")]
    Notifier(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result type alias using our `Error`
pub type Result<T> = std::result::Result<T, Error>;
