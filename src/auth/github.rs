//! GitHub token lookup

use crate::error::{Error, Result};
use tracing::debug;

/// Environment variable holding the GitHub API token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Resolved GitHub credentials
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Personal access token
    pub token: String,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Read the GitHub token from `GITHUB_TOKEN`
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    github_auth_from(std::env::var(TOKEN_ENV_VAR).ok())
}

/// Build auth config from an optional raw token value
///
/// Missing and blank values are both rejected.
pub fn github_auth_from(raw: Option<String>) -> Result<GitHubAuthConfig> {
    match raw.map(|t| t.trim().to_string()) {
        Some(token) if !token.is_empty() => {
            debug!("using GitHub token from {TOKEN_ENV_VAR}");
            Ok(GitHubAuthConfig { token })
        }
        _ => Err(Error::Auth(format!("{TOKEN_ENV_VAR} is required"))),
    }
}
