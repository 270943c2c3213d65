//! Log configuration

use crate::error::{Error, Result};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const DEFAULT_ENV_CONFIG: &str = "info,pr_ci_watch=info";

/// Install the global `tracing` subscriber
///
/// Filtering follows `RUST_LOG` when set, otherwise `verbose` raises this
/// crate to `debug`.
pub fn configure_logging(verbose: bool) -> Result<()> {
    let log_config = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "info,pr_ci_watch=debug".to_string()
        } else {
            DEFAULT_ENV_CONFIG.to_string()
        }
    });

    let filter = EnvFilter::from_str(&log_config)
        .map_err(|e| Error::Config(format!("invalid log filter {log_config:?}: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Internal(format!("failed to install log subscriber: {e}")))
}
