//! Notifier that records calls instead of showing anything

#![allow(dead_code)]

use async_trait::async_trait;
use pr_ci_watch::error::{Error, Result};
use pr_ci_watch::notify::{Notification, Notifier};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One call made to the notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Remove(String),
    Post(Notification),
}

#[derive(Default)]
struct RecorderState {
    calls: Mutex<Vec<NotifierCall>>,
    fail_remove: AtomicBool,
    fail_post: AtomicBool,
}

/// Recording notifier; clones share the same call log
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<RecorderState>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `remove` return an error (the call is still recorded)
    pub fn fail_remove(&self) {
        self.state.fail_remove.store(true, Ordering::SeqCst);
    }

    /// Make `post` return an error (the call is still recorded)
    pub fn fail_post(&self) {
        self.state.fail_post.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<NotifierCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Posted notifications, in order
    pub fn posts(&self) -> Vec<Notification> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                NotifierCall::Post(n) => Some(n),
                NotifierCall::Remove(_) => None,
            })
            .collect()
    }

    /// Removed groups, in order
    pub fn removes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                NotifierCall::Remove(g) => Some(g),
                NotifierCall::Post(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.state.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn remove(&self, group: &str) -> Result<()> {
        self.state
            .calls
            .lock()
            .unwrap()
            .push(NotifierCall::Remove(group.to_string()));
        if self.state.fail_remove.load(Ordering::SeqCst) {
            return Err(Error::Notifier("remove failed".to_string()));
        }
        Ok(())
    }

    async fn post(&self, notification: &Notification) -> Result<()> {
        self.state
            .calls
            .lock()
            .unwrap()
            .push(NotifierCall::Post(notification.clone()));
        if self.state.fail_post.load(Ordering::SeqCst) {
            return Err(Error::Notifier("post failed".to_string()));
        }
        Ok(())
    }
}
