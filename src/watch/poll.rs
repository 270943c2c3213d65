//! Poll loop over the tracked PR set

use crate::config::Config;
use crate::notify::NotificationSink;
use crate::platform::{PAGE_SIZE, PlatformService};
use crate::types::PullRequest;
use crate::watch::ci::check_ci;
use crate::watch::filter::find_recent_prs;
use crate::watch::merge::{MergeCheck, MergeTracker, check_merge};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Counters for one polling round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// PRs whose CI was evaluated
    pub checked: usize,
    /// PRs with at least one failing required context
    pub ci_failing: usize,
    /// Merge alerts raised
    pub merged: usize,
    /// PRs that stopped being tracked this round
    pub dropped: usize,
}

/// Owns all watcher state and runs polling rounds
///
/// Each round refreshes the PR set from the listing. PRs that vanish from
/// the open listing get one more merge check so a merge that happened
/// between rounds still alerts, then stop being tracked.
pub struct Watcher {
    platform: Box<dyn PlatformService>,
    sink: NotificationSink,
    author: String,
    recency_window: chrono::Duration,
    excluded: BTreeSet<String>,
    poll_interval: Duration,
    tracker: MergeTracker,
    tracked: Vec<PullRequest>,
}

impl Watcher {
    /// Create a watcher with an empty merge table
    pub fn new(platform: Box<dyn PlatformService>, sink: NotificationSink, config: &Config) -> Self {
        Self {
            platform,
            sink,
            author: config.author.clone(),
            recency_window: config.recency_window(),
            excluded: config.excluded_contexts.clone(),
            poll_interval: config.poll_interval(),
            tracker: MergeTracker::new(),
            tracked: Vec::new(),
        }
    }

    /// Replace the merge table, e.g. with a pre-seeded one
    #[must_use]
    pub fn with_tracker(mut self, tracker: MergeTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// PRs carried into the next round
    pub fn tracked(&self) -> &[PullRequest] {
        &self.tracked
    }

    /// Merge state table
    pub const fn tracker(&self) -> &MergeTracker {
        &self.tracker
    }

    /// Fetch the author's recent PRs without checking them
    pub async fn list_recent(&self, now: DateTime<Utc>) -> crate::error::Result<Vec<PullRequest>> {
        find_recent_prs(
            self.platform.as_ref(),
            &self.author,
            self.recency_window,
            now,
            PAGE_SIZE,
        )
        .await
    }

    /// Run one polling round
    pub async fn run_round(&mut self, now: DateTime<Utc>) -> RoundSummary {
        let mut summary = RoundSummary::default();

        let (open, carried) = match self.list_recent(now).await {
            Ok(fresh) => {
                let carried: Vec<PullRequest> = std::mem::take(&mut self.tracked)
                    .into_iter()
                    .filter(|old| !fresh.iter().any(|pr| pr.number == old.number))
                    .collect();
                (fresh, carried)
            }
            Err(e) => {
                warn!(error = %e, "failed to refresh PR list, keeping previous set");
                (std::mem::take(&mut self.tracked), Vec::new())
            }
        };

        let mut next = Vec::with_capacity(open.len() + carried.len());

        for pr in open {
            info!(pr_number = pr.number, "checking PR");
            summary.checked += 1;

            if !check_ci(self.platform.as_ref(), &self.sink, &pr, &self.excluded).await {
                summary.ci_failing += 1;
                next.push(pr);
                continue;
            }

            match check_merge(self.platform.as_ref(), &self.sink, &mut self.tracker, &pr).await {
                MergeCheck::Observed { details, alerted } => {
                    if alerted {
                        summary.merged += 1;
                    }
                    if details.is_closed() {
                        summary.dropped += 1;
                        continue;
                    }
                    next.push(pr);
                }
                MergeCheck::Skipped => next.push(pr),
            }
        }

        for pr in carried {
            debug!(pr_number = pr.number, "PR left the open listing, checking merge");
            match check_merge(self.platform.as_ref(), &self.sink, &mut self.tracker, &pr).await {
                MergeCheck::Observed { alerted, .. } => {
                    if alerted {
                        summary.merged += 1;
                    }
                    summary.dropped += 1;
                }
                MergeCheck::Skipped => next.push(pr),
            }
        }

        self.tracked = next;
        summary
    }

    /// Poll until `shutdown` resolves
    ///
    /// Shutdown is honoured between rounds and while sleeping; a round in
    /// progress always completes.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let summary = self.run_round(Utc::now()).await;
            info!(
                checked = summary.checked,
                ci_failing = summary.ci_failing,
                merged = summary.merged,
                dropped = summary.dropped,
                tracked = self.tracked.len(),
                "round complete"
            );

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
                () = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}
