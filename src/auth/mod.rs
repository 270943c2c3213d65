//! Authentication for GitHub
//!
//! The token comes from the environment; there is no interactive login.

mod github;

pub use github::{GitHubAuthConfig, TOKEN_ENV_VAR, get_github_auth, github_auth_from};
