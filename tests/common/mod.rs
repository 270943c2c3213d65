//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;
mod recording_notifier;

pub use mock_platform::{ListCall, MockPlatformService};
pub use recording_notifier::{NotifierCall, RecordingNotifier};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pr_ci_watch::config::{Config, NotifierConfig};
use pr_ci_watch::notify::NotificationSink;
use pr_ci_watch::types::{CiState, PrState, PullRequest, PullRequestDetails, StatusEntry};

/// Fixed "now" used by tests that do not hit the real clock
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
}

/// Config watching `alice`, with no delay between repeated notifications
pub fn test_config() -> Config {
    Config {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        author: "alice".to_string(),
        notifier: NotifierConfig {
            repeat_delay_secs: 0,
            ..NotifierConfig::default()
        },
        ..Config::default()
    }
}

/// Sink over a recording notifier, plus a handle to inspect calls
pub fn recording_sink(config: &Config) -> (NotificationSink, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let sink = NotificationSink::new(Box::new(notifier.clone()), config.notifier.clone());
    (sink, notifier)
}

/// PR opened `age` before `now`
pub fn make_pr(number: u64, author: &str, now: DateTime<Utc>, age: Duration) -> PullRequest {
    PullRequest {
        number,
        author: author.to_string(),
        created_at: now - age,
        head_sha: format!("sha{number}"),
        title: format!("PR {number}"),
        merged: false,
    }
}

/// Details for an open or merged PR made by `make_pr`
pub fn make_details(number: u64, merged: bool) -> PullRequestDetails {
    PullRequestDetails {
        number,
        title: format!("PR {number}"),
        state: if merged { PrState::Merged } else { PrState::Open },
        merged,
        head_sha: format!("sha{number}"),
    }
}

/// Status entry updated `minute` minutes after 10:00 on the test day
pub fn make_status(context: &str, state: CiState, minute: u32) -> StatusEntry {
    StatusEntry {
        context: context.to_string(),
        state,
        updated_at: Utc.with_ymd_and_hms(2024, 5, 10, 10, minute, 0).unwrap(),
        description: None,
        target_url: None,
    }
}
