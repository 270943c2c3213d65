//! Watcher configuration
//!
//! Layered as built-in defaults, then an optional TOML file, then CLI flags.
//! The default file lives at `<config dir>/prwatch/config.toml`.

use crate::error::{Error, Result};
use crate::types::RepoConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the user config dir
const CONFIG_DIR: &str = "prwatch";

/// Filename for the config file
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Login whose PRs are watched
    pub author: String,
    /// GitHub Enterprise host (None for github.com)
    pub host: Option<String>,
    /// Seconds to sleep between polling rounds
    pub poll_interval_secs: u64,
    /// Only PRs opened within this many days are watched
    pub recency_days: u32,
    /// CI contexts that never trigger a failure alert
    pub excluded_contexts: BTreeSet<String>,
    /// Desktop notifier settings
    pub notifier: NotifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: "PaddlePaddle".to_string(),
            repo: "Paddle".to_string(),
            author: "GoldenStain".to_string(),
            host: None,
            poll_interval_secs: 360,
            recency_days: 7,
            excluded_contexts: BTreeSet::from(["PR-CI-Kunlun-R200".to_string()]),
            notifier: NotifierConfig::default(),
        }
    }
}

/// Settings for the external notifier binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    /// Notifier executable name or path
    pub program: String,
    /// Seconds before a notification is dismissed
    pub timeout_secs: u32,
    /// Sound to play
    pub sound: String,
    /// Times each CI failure alert is posted
    pub failure_repeat: u32,
    /// Times each merge alert is posted
    pub merge_repeat: u32,
    /// Seconds between repeated posts
    pub repeat_delay_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            program: "terminal-notifier".to_string(),
            timeout_secs: 10,
            sound: "default".to_string(),
            failure_repeat: 3,
            merge_repeat: 1,
            repeat_delay_secs: 2,
        }
    }
}

impl NotifierConfig {
    /// Delay between repeated posts
    pub const fn repeat_delay(&self) -> Duration {
        Duration::from_secs(self.repeat_delay_secs)
    }
}

/// Values given on the command line, applied over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repo: Option<String>,
    /// Watched author
    pub author: Option<String>,
    /// Enterprise host
    pub host: Option<String>,
    /// Poll interval in seconds
    pub poll_interval_secs: Option<u64>,
}

impl Config {
    /// Repository coordinates for the platform service
    pub fn repo_config(&self) -> RepoConfig {
        RepoConfig {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            host: self.host.clone(),
        }
    }

    /// Delay between polling rounds
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Recency window for the PR filter
    pub fn recency_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.recency_days))
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(owner) = overrides.owner {
            self.owner = owner;
        }
        if let Some(repo) = overrides.repo {
            self.repo = repo;
        }
        if let Some(author) = overrides.author {
            self.author = author;
        }
        if overrides.host.is_some() {
            self.host = overrides.host;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            self.poll_interval_secs = secs;
        }
        self
    }

    /// Check values that would make the watcher misbehave
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("author", &self.author),
            ("notifier.program", &self.notifier.program),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{name} must not be empty")));
            }
        }
        if self.poll_interval_secs == 0 {
            return Err(Error::Config(
                "poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.recency_days == 0 {
            return Err(Error::Config(
                "recency_days must be greater than zero".to_string(),
            ));
        }
        if self.notifier.failure_repeat == 0 || self.notifier.merge_repeat == 0 {
            return Err(Error::Config(
                "notifier repeat counts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config file path, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Parse a config from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {e}")))
}

/// Load a config file from an explicit path
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load configuration
///
/// An explicit path must exist. Without one, the default path is used when
/// present, and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config_file(&path),
        _ => Ok(Config::default()),
    }
}
