//! Command implementations for the `prwatch` binary

use anyhow::Context;
use chrono::Utc;
use pr_ci_watch::auth::get_github_auth;
use pr_ci_watch::config::{Config, ConfigOverrides, load_config};
use pr_ci_watch::notify::{NotificationSink, TerminalNotifier};
use pr_ci_watch::platform::GitHubService;
use pr_ci_watch::watch::Watcher;
use std::path::Path;
use tracing::{info, warn};

/// What the binary should do once set up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Poll until interrupted
    Watch,
    /// Run one round
    Once,
    /// Print watched PRs
    List,
}

/// Load config, build services, and run the requested mode
pub async fn run(config_path: Option<&Path>, overrides: ConfigOverrides, mode: Mode) -> anyhow::Result<()> {
    let config = load_config(config_path)
        .context("loading configuration")?
        .with_overrides(overrides);
    config.validate().context("validating configuration")?;

    let auth = get_github_auth()?;
    let mut watcher = build_watcher(&config, &auth.token)?;

    match mode {
        Mode::List => {
            let prs = watcher
                .list_recent(Utc::now())
                .await
                .context("fetching pull requests")?;
            if prs.is_empty() {
                println!("No open PRs by {} in the last {} days", config.author, config.recency_days);
            }
            for pr in prs {
                println!("#{} {} ({})", pr.number, pr.title, pr.created_at.format("%Y-%m-%d %H:%M"));
            }
        }
        Mode::Once => {
            let summary = watcher.run_round(Utc::now()).await;
            info!(?summary, "single round complete");
        }
        Mode::Watch => {
            info!(
                repo = %config.repo_config(),
                author = %config.author,
                interval_secs = config.poll_interval_secs,
                "watching PRs"
            );
            watcher.run(shutdown_signal()).await;
        }
    }

    Ok(())
}

fn build_watcher(config: &Config, token: &str) -> anyhow::Result<Watcher> {
    let platform = GitHubService::new(token, config.repo_config()).context("creating GitHub client")?;
    let sink = NotificationSink::new(
        Box::new(TerminalNotifier::new(config.notifier.program.clone())),
        config.notifier.clone(),
    );
    Ok(Watcher::new(Box::new(platform), sink, config))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
