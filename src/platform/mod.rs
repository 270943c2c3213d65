//! Platform services for GitHub
//!
//! Everything the watcher needs from the hosting API goes through
//! [`PlatformService`], so the polling core can run against a mock.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PullRequest, PullRequestDetails, RepoConfig, StatusEntry};
use async_trait::async_trait;

/// Page size used for every paginated listing
pub const PAGE_SIZE: u8 = 100;

/// Platform service trait for the read-only PR operations the watcher uses
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List one page of open PRs, newest-created first
    ///
    /// Pages are 1-based. A page shorter than `per_page` is the last one.
    async fn list_open_prs(&self, page: u32, per_page: u8) -> Result<Vec<PullRequest>>;

    /// Get full PR details, including the authoritative merge flag
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// List the full commit status history for a ref
    ///
    /// Entries are returned as GitHub reports them: a context appears once
    /// per update, so re-runs produce repeated contexts.
    async fn list_commit_statuses(&self, ref_name: &str) -> Result<Vec<StatusEntry>>;

    /// Get the repository this service is bound to
    fn config(&self) -> &RepoConfig;
}
