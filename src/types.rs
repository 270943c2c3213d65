//! Core types for pr-ci-watch

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An open pull request as seen in the repository listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Login of the PR author
    pub author: String,
    /// When the PR was opened
    pub created_at: DateTime<Utc>,
    /// SHA of the head commit
    pub head_sha: String,
    /// PR title
    pub title: String,
    /// Whether the PR is merged (summary listings leave this `false`)
    pub merged: bool,
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Authoritative PR state from the single-PR endpoint
///
/// The list endpoint does not reliably carry the merge flag, so merge
/// tracking always works from this fuller fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Current state of the PR
    pub state: PrState,
    /// Whether the PR has been merged
    pub merged: bool,
    /// SHA of the head commit
    pub head_sha: String,
}

impl PullRequestDetails {
    /// Whether the PR is no longer open
    pub const fn is_closed(&self) -> bool {
        !matches!(self.state, PrState::Open)
    }
}

/// State reported by a commit status context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CiState {
    /// Context passed
    Success,
    /// Context failed
    Failure,
    /// Context still running
    Pending,
    /// Context errored out (not counted as a failure)
    Error,
    /// Any state GitHub may add later
    Other(String),
}

impl From<String> for CiState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "pending" => Self::Pending,
            "error" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl From<CiState> for String {
    fn from(state: CiState) -> Self {
        state.to_string()
    }
}

impl std::fmt::Display for CiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Pending => write!(f, "pending"),
            Self::Error => write!(f, "error"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One entry in a commit's status history
///
/// Contexts repeat as CI re-runs, so several entries may share a name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusEntry {
    /// Name of the reporting context
    pub context: String,
    /// Reported state
    pub state: CiState,
    /// When this entry was last updated
    pub updated_at: DateTime<Utc>,
    /// Short description set by the reporter
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the CI run
    #[serde(default)]
    pub target_url: Option<String>,
}

/// Newest status entry per context for one commit
pub type LatestStatusSet = BTreeMap<String, StatusEntry>;

/// Repository the watcher is pointed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// GitHub Enterprise host (None for github.com)
    pub host: Option<String>,
}

impl std::fmt::Display for RepoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
