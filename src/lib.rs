//! pr-ci-watch: desktop alerts for your open GitHub pull requests
//!
//! Polls a repository for open PRs by one author, raises a notification when
//! a required CI context fails on a PR's head commit, and another when the PR
//! is merged.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod platform;
pub mod types;
pub mod watch;

pub use error::{Error, Result};
