//! Desktop notifications
//!
//! [`Notifier`] is the raw delivery mechanism (an external binary in
//! production). [`NotificationSink`] layers the alert protocol on top:
//! clear the group, then post the alert the configured number of times.
//! Delivery failures are logged and never returned to the caller.

mod terminal;

pub use terminal::TerminalNotifier;

use crate::config::NotifierConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// A notification ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Notification title
    pub title: String,
    /// Body text
    pub message: String,
    /// Group used to replace earlier notifications for the same subject
    pub group: String,
    /// Seconds before the notification is dismissed
    pub timeout_secs: u32,
    /// Sound name
    pub sound: String,
}

/// Kind of alert, which decides its text and repeat count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A required CI context failed
    CiFailure {
        /// PR number
        pr_number: u64,
        /// PR title
        pr_title: String,
        /// Failing context name
        context: String,
    },
    /// The PR was merged
    Merged {
        /// PR number
        pr_number: u64,
        /// PR title
        pr_title: String,
    },
}

impl Alert {
    /// PR the alert is about
    pub const fn pr_number(&self) -> u64 {
        match self {
            Self::CiFailure { pr_number, .. } | Self::Merged { pr_number, .. } => *pr_number,
        }
    }

    /// Notification group for the alert's PR
    pub fn group(&self) -> String {
        format!("PR-{}", self.pr_number())
    }

    /// Notification title
    pub fn title(&self) -> String {
        match self {
            Self::CiFailure { pr_number, .. } => format!("PR #{pr_number} CI Failure"),
            Self::Merged { pr_number, .. } => format!("PR #{pr_number} Merged"),
        }
    }

    /// Notification body
    pub fn message(&self) -> String {
        match self {
            Self::CiFailure {
                pr_title, context, ..
            } => format!("CI: {context}\nPR: {pr_title}"),
            Self::Merged { pr_title, .. } => format!("PR: {pr_title}"),
        }
    }
}

/// Raw notification delivery
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Remove any displayed notifications in `group`
    async fn remove(&self, group: &str) -> Result<()>;

    /// Post a notification
    async fn post(&self, notification: &Notification) -> Result<()>;
}

/// Alert dispatcher applying the remove-then-post protocol
pub struct NotificationSink {
    notifier: Box<dyn Notifier>,
    config: NotifierConfig,
}

impl NotificationSink {
    /// Create a sink over a notifier
    pub fn new(notifier: Box<dyn Notifier>, config: NotifierConfig) -> Self {
        Self { notifier, config }
    }

    /// Build the notification for an alert
    pub fn notification_for(&self, alert: &Alert) -> Notification {
        Notification {
            title: alert.title(),
            message: alert.message(),
            group: alert.group(),
            timeout_secs: self.config.timeout_secs,
            sound: self.config.sound.clone(),
        }
    }

    /// Times an alert of this kind is posted
    pub const fn repeat_for(&self, alert: &Alert) -> u32 {
        match alert {
            Alert::CiFailure { .. } => self.config.failure_repeat,
            Alert::Merged { .. } => self.config.merge_repeat,
        }
    }

    /// Deliver an alert, best-effort
    pub async fn send(&self, alert: &Alert) {
        let notification = self.notification_for(alert);
        let repeat = self.repeat_for(alert);
        info!(
            pr_number = alert.pr_number(),
            title = %notification.title,
            repeat,
            "raising alert"
        );

        if let Err(e) = self.notifier.remove(&notification.group).await {
            warn!(group = %notification.group, error = %e, "failed to remove old notification");
        }

        let delay = self.config.repeat_delay();
        for i in 0..repeat {
            if let Err(e) = self.notifier.post(&notification).await {
                warn!(group = %notification.group, error = %e, "failed to send notification");
            }
            if i + 1 < repeat && delay > Duration::ZERO {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
