//! Merge tracking: one alert per false -> true transition

use crate::notify::{Alert, NotificationSink};
use crate::platform::PlatformService;
use crate::types::{PullRequest, PullRequestDetails};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Last observed merge state per PR
///
/// Entries are only written when the observed state changes and are never
/// removed, so a PR keeps its "already alerted" mark for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct MergeTracker {
    merged: HashMap<u64, bool>,
}

impl MergeTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation; returns `true` if a merge alert is due
    pub fn observe(&mut self, pr_number: u64, merged: bool) -> bool {
        if self.merged.get(&pr_number) == Some(&merged) {
            return false;
        }
        self.merged.insert(pr_number, merged);
        merged
    }

    /// Last observed merge state, if the PR has been seen
    pub fn last_seen(&self, pr_number: u64) -> Option<bool> {
        self.merged.get(&pr_number).copied()
    }

    /// Number of PRs with a recorded state
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    /// Whether no PR has been observed yet
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }
}

/// Outcome of a merge check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeCheck {
    /// Details could not be fetched; nothing was recorded
    Skipped,
    /// Details were fetched and recorded
    Observed {
        /// Fetched details
        details: PullRequestDetails,
        /// Whether a merge alert was raised
        alerted: bool,
    },
}

/// Fetch a PR's merge state and alert if it was just merged
pub async fn check_merge(
    platform: &dyn PlatformService,
    sink: &NotificationSink,
    tracker: &mut MergeTracker,
    pr: &PullRequest,
) -> MergeCheck {
    let details = match platform.get_pr_details(pr.number).await {
        Ok(details) => details,
        Err(e) => {
            warn!(pr_number = pr.number, error = %e, "failed to get PR details");
            return MergeCheck::Skipped;
        }
    };

    let alerted = tracker.observe(pr.number, details.merged);
    if alerted {
        info!(pr_number = pr.number, "PR merged");
        sink.send(&Alert::Merged {
            pr_number: pr.number,
            pr_title: details.title.clone(),
        })
        .await;
    } else {
        debug!(pr_number = pr.number, merged = details.merged, "merge state unchanged");
    }

    MergeCheck::Observed { details, alerted }
}
