//! Turns raw command line values into the list of sites to check and the
//! shared [`CheckConfig`].

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A single site to check. Always carries a scheme once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Resolves one raw candidate. Candidates that do not mention `http`
    /// anywhere (case-insensitive) get an `https://` prefix; everything else is
    /// taken verbatim, so `myhttpserver.com` is left alone.
    pub fn resolve(candidate: &str) -> Self {
        if candidate.to_lowercase().contains("http") {
            Target(candidate.to_string())
        } else {
            Target(format!("https://{candidate}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Retry and timeout settings shared by every target of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConfig {
    /// Total number of attempts per target, at least 1.
    pub max_retries: u32,
    /// Pause between two failed attempts.
    pub retry_interval: Duration,
    /// Upper bound for a single request, connection setup included.
    pub request_timeout: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No websites specified")]
    NoSites,

    #[error("Max retries must be at least 1, got {0}")]
    InvalidMaxRetries(i64),

    #[error("Request timeout must be greater than zero")]
    InvalidTimeout,
}

/// Splits `raw_sites` on commas and validates the numeric settings.
///
/// Segments are not trimmed: `"a.com, b.com"` yields `https://a.com` and
/// `https:// b.com`.
pub fn resolve(
    raw_sites: &str,
    max_retries: i64,
    retry_interval: Duration,
    request_timeout: Duration,
) -> Result<(Vec<Target>, CheckConfig), ConfigError> {
    if raw_sites.is_empty() {
        return Err(ConfigError::NoSites);
    }

    let max_retries = u32::try_from(max_retries)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or(ConfigError::InvalidMaxRetries(max_retries))?;

    if request_timeout.is_zero() {
        return Err(ConfigError::InvalidTimeout);
    }

    let targets: Vec<Target> = raw_sites.split(',').map(Target::resolve).collect();
    debug!(count = targets.len(), ?targets, "resolved targets");

    Ok((
        targets,
        CheckConfig {
            max_retries,
            retry_interval,
            request_timeout,
        },
    ))
}
