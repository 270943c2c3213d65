//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use pr_ci_watch::error::{Error, Result};
use pr_ci_watch::platform::PlatformService;
use pr_ci_watch::types::{PullRequest, PullRequestDetails, RepoConfig, StatusEntry};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Call record for `list_open_prs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCall {
    pub page: u32,
    pub per_page: u8,
}

#[derive(Default)]
struct MockState {
    open_prs: Mutex<Vec<PullRequest>>,
    statuses: Mutex<HashMap<String, Vec<StatusEntry>>>,
    details: Mutex<HashMap<u64, PullRequestDetails>>,
    // Call tracking
    list_calls: Mutex<Vec<ListCall>>,
    status_calls: Mutex<Vec<String>>,
    details_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_list_page: Mutex<Option<u32>>,
    error_on_statuses: Mutex<HashSet<String>>,
    error_on_details: Mutex<HashSet<u64>>,
}

/// Simple mock platform service for testing
///
/// Cloning shares state, so a test can keep a handle while the watcher owns
/// a boxed copy.
///
/// Features:
/// - Paginates a single newest-first listing by the requested page size
/// - Call tracking for verification
/// - Configurable statuses per SHA and details per PR
/// - Error injection for failure path testing
#[derive(Clone)]
pub struct MockPlatformService {
    config: RepoConfig,
    state: Arc<MockState>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    /// Create a new mock for `test/repo`
    pub fn new() -> Self {
        Self {
            config: RepoConfig {
                owner: "test".to_string(),
                repo: "repo".to_string(),
                host: None,
            },
            state: Arc::new(MockState::default()),
        }
    }

    // === Response setup ===

    /// Set the open PR listing (newest first)
    pub fn set_open_prs(&self, prs: Vec<PullRequest>) {
        *self.state.open_prs.lock().unwrap() = prs;
    }

    /// Set the status history for a SHA
    pub fn set_statuses(&self, sha: &str, statuses: Vec<StatusEntry>) {
        self.state
            .statuses
            .lock()
            .unwrap()
            .insert(sha.to_string(), statuses);
    }

    /// Set the details returned for a PR
    pub fn set_details(&self, details: PullRequestDetails) {
        self.state
            .details
            .lock()
            .unwrap()
            .insert(details.number, details);
    }

    // === Error injection methods ===

    /// Make every `list_open_prs` call fail
    pub fn fail_list(&self, msg: &str) {
        *self.state.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Stop failing `list_open_prs`
    pub fn clear_list_failure(&self) {
        *self.state.error_on_list.lock().unwrap() = None;
        *self.state.error_on_list_page.lock().unwrap() = None;
    }

    /// Make `list_open_prs` fail for one page
    pub fn fail_list_page(&self, page: u32) {
        *self.state.error_on_list_page.lock().unwrap() = Some(page);
    }

    /// Make `list_commit_statuses` fail for a SHA
    pub fn fail_statuses(&self, sha: &str) {
        self.state
            .error_on_statuses
            .lock()
            .unwrap()
            .insert(sha.to_string());
    }

    /// Make `get_pr_details` fail for a PR
    pub fn fail_details(&self, pr_number: u64) {
        self.state.error_on_details.lock().unwrap().insert(pr_number);
    }

    /// Stop failing `get_pr_details` for a PR
    pub fn clear_details_failure(&self, pr_number: u64) {
        self.state.error_on_details.lock().unwrap().remove(&pr_number);
    }

    // === Call tracking ===

    pub fn list_calls(&self) -> Vec<ListCall> {
        self.state.list_calls.lock().unwrap().clone()
    }

    pub fn listed_pages(&self) -> Vec<u32> {
        self.list_calls().into_iter().map(|c| c.page).collect()
    }

    pub fn status_calls(&self) -> Vec<String> {
        self.state.status_calls.lock().unwrap().clone()
    }

    pub fn details_calls(&self) -> Vec<u64> {
        self.state.details_calls.lock().unwrap().clone()
    }

    /// Forget recorded calls, keeping responses
    pub fn reset_calls(&self) {
        self.state.list_calls.lock().unwrap().clear();
        self.state.status_calls.lock().unwrap().clear();
        self.state.details_calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self, page: u32, per_page: u8) -> Result<Vec<PullRequest>> {
        self.state
            .list_calls
            .lock()
            .unwrap()
            .push(ListCall { page, per_page });

        if let Some(msg) = self.state.error_on_list.lock().unwrap().clone() {
            return Err(Error::GitHubApi(msg));
        }
        if *self.state.error_on_list_page.lock().unwrap() == Some(page) {
            return Err(Error::GitHubApi(format!("page {page} unavailable")));
        }

        let prs = self.state.open_prs.lock().unwrap();
        let size = usize::from(per_page);
        let start = (page as usize).saturating_sub(1) * size;
        Ok(prs.iter().skip(start).take(size).cloned().collect())
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.state.details_calls.lock().unwrap().push(pr_number);

        if self.state.error_on_details.lock().unwrap().contains(&pr_number) {
            return Err(Error::GitHubApi(format!("details for #{pr_number} unavailable")));
        }

        self.state
            .details
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))
    }

    async fn list_commit_statuses(&self, ref_name: &str) -> Result<Vec<StatusEntry>> {
        self.state
            .status_calls
            .lock()
            .unwrap()
            .push(ref_name.to_string());

        if self.state.error_on_statuses.lock().unwrap().contains(ref_name) {
            return Err(Error::GitHubApi(format!("statuses for {ref_name} unavailable")));
        }

        Ok(self
            .state
            .statuses
            .lock()
            .unwrap()
            .get(ref_name)
            .cloned()
            .unwrap_or_default())
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}
