//! prwatch - desktop alerts for CI failures and merges on your GitHub PRs

mod cli;

use clap::Parser;
use pr_ci_watch::config::ConfigOverrides;
use std::path::PathBuf;
use std::process::ExitCode;

/// Watch your open GitHub PRs and get desktop alerts on CI failure and merge
#[derive(Parser, Debug)]
#[command(name = "prwatch", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository owner
    #[arg(long)]
    owner: Option<String>,

    /// Repository name
    #[arg(long)]
    repo: Option<String>,

    /// Author whose PRs are watched
    #[arg(long)]
    author: Option<String>,

    /// GitHub Enterprise host (e.g. github.example.com)
    #[arg(long)]
    host: Option<String>,

    /// Seconds between polling rounds
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,

    /// Run a single round and exit
    #[arg(long, conflicts_with = "list")]
    once: bool,

    /// Print the PRs that would be watched and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            author: self.author.clone(),
            host: self.host.clone(),
            poll_interval_secs: self.interval,
        }
    }

    const fn mode(&self) -> cli::Mode {
        if self.list {
            cli::Mode::List
        } else if self.once {
            cli::Mode::Once
        } else {
            cli::Mode::Watch
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = pr_ci_watch::logging::configure_logging(cli.verbose) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match cli::run(cli.config.as_deref(), cli.overrides(), cli.mode()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
