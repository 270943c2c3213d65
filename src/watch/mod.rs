//! Polling and state reconciliation
//!
//! - `filter` - pick the author's recent open PRs from the paginated listing
//! - `ci` - reduce a commit's status feed to a verdict and alert on failures
//! - `merge` - remember merge state per PR and alert once on merge
//! - `poll` - run rounds over the tracked PRs until shutdown

mod ci;
mod filter;
mod merge;
mod poll;

pub use ci::{check_ci, failing_contexts, latest_statuses};
pub use filter::find_recent_prs;
pub use merge::{MergeCheck, MergeTracker, check_merge};
pub use poll::{RoundSummary, Watcher};
