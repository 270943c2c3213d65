//! `terminal-notifier` backed notifier

use crate::error::{Error, Result};
use crate::notify::{Notification, Notifier};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Notifier that shells out to `terminal-notifier` (or a compatible binary)
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    program: String,
}

impl TerminalNotifier {
    /// Create a notifier running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for removing a group
    pub fn remove_args(group: &str) -> Vec<String> {
        vec!["-remove".to_string(), group.to_string()]
    }

    /// Arguments for posting a notification
    pub fn post_args(notification: &Notification) -> Vec<String> {
        vec![
            "-title".to_string(),
            notification.title.clone(),
            "-message".to_string(),
            notification.message.clone(),
            "-timeout".to_string(),
            notification.timeout_secs.to_string(),
            "-sound".to_string(),
            notification.sound.clone(),
            "-group".to_string(),
            notification.group.clone(),
        ]
    }

    async fn run(&self, args: Vec<String>) -> Result<()> {
        debug!(program = %self.program, ?args, "running notifier");
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .await
            .map_err(|e| Error::Notifier(format!("failed to run {}: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Notifier(format!("{} exited with {status}", self.program)))
        }
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn remove(&self, group: &str) -> Result<()> {
        self.run(Self::remove_args(group)).await
    }

    async fn post(&self, notification: &Notification) -> Result<()> {
        self.run(Self::post_args(notification)).await
    }
}
