//! PR filter: the author's open PRs inside the recency window

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::PullRequest;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Find open PRs by `author` created after `now - window`
///
/// The listing is newest-first, so scanning stops at the first PR at or
/// before the cutoff and no further pages are requested. That PR is not
/// checked for authorship. Any fetch error aborts the whole search.
pub async fn find_recent_prs(
    platform: &dyn PlatformService,
    author: &str,
    window: Duration,
    now: DateTime<Utc>,
    per_page: u8,
) -> Result<Vec<PullRequest>> {
    let cutoff = now - window;
    let mut matched = Vec::new();
    let mut page = 1;

    'pages: loop {
        let prs = platform.list_open_prs(page, per_page).await?;
        let count = prs.len();
        if count == 0 {
            break;
        }

        for pr in prs {
            if pr.created_at <= cutoff {
                debug!(pr_number = pr.number, %cutoff, "reached recency cutoff");
                break 'pages;
            }
            if pr.author == author {
                matched.push(pr);
            }
        }

        if count < usize::from(per_page) {
            break;
        }
        page += 1;
    }

    debug!(author, count = matched.len(), pages = page, "found recent PRs");
    Ok(matched)
}
