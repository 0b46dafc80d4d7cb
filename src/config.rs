use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::feed::client::DEFAULT_FEED_URL;
use crate::retry::RetryPolicy;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Built
/// once in `main` and passed down; nothing in the pipeline reads the
/// environment itself.
#[derive(Debug, Clone)]
pub struct Config {
    /// Downstream host that receives `/event` posts (DG_HOST).
    /// Required to run the monitor, not for `init` or `status`.
    pub destination_host: String,
    pub db_path: String,
    pub feed_url: String,
    /// Per-request timeout for both the feed and the forwarder
    pub http_timeout: Duration,
    /// Total attempts per feed fetch, including the first
    pub fetch_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let http_timeout_secs: u64 = parse_var("PSBMON_HTTP_TIMEOUT_SECS", 30)?;
        let fetch_attempts: u32 = parse_var("PSBMON_FETCH_ATTEMPTS", 3)?;
        if fetch_attempts == 0 {
            anyhow::bail!("PSBMON_FETCH_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            destination_host: env::var("DG_HOST").unwrap_or_default(),
            db_path: env::var("PSBMON_DB_PATH").unwrap_or_else(|_| "./pastes.db".to_string()),
            feed_url: env::var("PSBMON_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
            fetch_attempts,
        })
    }

    /// Check that the destination host is configured.
    /// Call this before starting the monitor.
    pub fn require_destination(&self) -> Result<()> {
        if self.destination_host.trim().is_empty() {
            anyhow::bail!(
                "Must provide Dr.Gero API host in DG_HOST environment variable.\n\
                 Add it to your .env file or export it before running."
            );
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.fetch_attempts)
    }
}

/// Convert the `--interval` flag (minutes) into a tick period.
pub fn poll_interval(minutes: u64) -> Result<Duration> {
    if minutes == 0 {
        anyhow::bail!("Interval must be at least 1 minute");
    }
    let secs = minutes
        .checked_mul(60)
        .with_context(|| format!("Interval of {minutes} minutes is too large"))?;
    Ok(Duration::from_secs(secs))
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {name}: {raw:?}")),
        _ => Ok(default),
    }
}
