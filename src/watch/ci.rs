//! CI evaluation over the commit status feed

use crate::notify::{Alert, NotificationSink};
use crate::platform::PlatformService;
use crate::types::{CiState, LatestStatusSet, PullRequest, StatusEntry};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Keep the most recently updated entry per context
///
/// On equal timestamps the entry seen last wins.
pub fn latest_statuses(entries: impl IntoIterator<Item = StatusEntry>) -> LatestStatusSet {
    let mut latest = LatestStatusSet::new();
    for entry in entries {
        let newer = latest
            .get(&entry.context)
            .is_none_or(|existing| existing.updated_at <= entry.updated_at);
        if newer {
            latest.insert(entry.context.clone(), entry);
        }
    }
    latest
}

/// Contexts in `latest` that failed and are not excluded, in name order
pub fn failing_contexts<'a>(
    latest: &'a LatestStatusSet,
    excluded: &BTreeSet<String>,
) -> Vec<&'a StatusEntry> {
    latest
        .values()
        .filter(|s| s.state == CiState::Failure && !excluded.contains(&s.context))
        .collect()
}

/// Check CI on a PR's head commit, alerting once per failing context
///
/// Returns `true` when no required context is failing. A failed fetch or an
/// empty feed counts as passing so API hiccups never raise alerts.
pub async fn check_ci(
    platform: &dyn PlatformService,
    sink: &NotificationSink,
    pr: &PullRequest,
    excluded: &BTreeSet<String>,
) -> bool {
    let entries = match platform.list_commit_statuses(&pr.head_sha).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(pr_number = pr.number, error = %e, "failed to get CI status");
            return true;
        }
    };

    if entries.is_empty() {
        info!(pr_number = pr.number, sha = %pr.head_sha, "no statuses found");
        return true;
    }

    let latest = latest_statuses(entries);
    debug!(pr_number = pr.number, contexts = latest.len(), "reduced CI statuses");

    let failing = failing_contexts(&latest, excluded);
    for status in &failing {
        info!(pr_number = pr.number, context = %status.context, "CI failed");
        sink.send(&Alert::CiFailure {
            pr_number: pr.number,
            pr_title: pr.title.clone(),
            context: status.context.clone(),
        })
        .await;
    }

    failing.is_empty()
}
