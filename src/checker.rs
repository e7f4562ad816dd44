//! The per-site retry loop.
//!
//! A site is checked by issuing up to [`CheckConfig::max_retries`] GET requests.
//! Any transport error (timeout, refused connection, DNS or TLS failure) and
//! any status other than `200 OK` fails the attempt. Failed attempts are
//! followed by a pause of [`CheckConfig::retry_interval`], except for the last
//! one. The first successful attempt ends the loop.

use crate::resolver::{CheckConfig, Target};
use reqwest::header::{
    CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, SERVER, STRICT_TRANSPORT_SECURITY,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Why a single attempt failed. All kinds are retried the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "status", rename_all = "camelCase")]
pub enum FailureKind {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("request failed")]
    Request,

    #[error("unexpected status code {0}")]
    Status(u16),
}

impl FailureKind {
    /// Maps a transport error onto a failure kind.
    pub fn from_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            FailureKind::Timeout
        } else if error.is_connect() {
            FailureKind::Connect
        } else {
            FailureKind::Request
        }
    }
}

/// One failed attempt, as handed to the observer of [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// 1-based attempt number.
    pub attempt: u32,
    pub kind: FailureKind,
    /// The pause before the next attempt, `None` if this was the last one.
    pub retry_in: Option<Duration>,
}

/// Header derived fields of a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDetails {
    /// `-1` when the server did not announce a length.
    pub content_length: i64,
    pub server: String,
    pub content_type: String,
    pub ssl_enabled: bool,
}

impl HeaderDetails {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|len| *len >= 0)
            .unwrap_or(-1);

        HeaderDetails {
            content_length,
            server: header_value(headers, &SERVER),
            content_type: header_value(headers, &CONTENT_TYPE),
            ssl_enabled: !header_value(headers, &STRICT_TRANSPORT_SECURITY).is_empty(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Outcome of checking one site.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub target: Target,
    pub succeeded: bool,
    /// Number of requests issued, including the successful one.
    pub attempts: u32,
    /// Time until the response headers of the successful attempt arrived.
    pub response_time: Duration,
    pub content_length: i64,
    /// The final URL after redirects.
    pub redirect_url: String,
    pub server_header: String,
    pub content_type: String,
    /// Whether a `Strict-Transport-Security` header was sent.
    pub ssl_enabled: bool,
    /// Classification of the last failed attempt, if any.
    pub last_failure: Option<FailureKind>,
}

impl CheckResult {
    fn up(
        target: &Target,
        attempts: u32,
        response_time: Duration,
        redirect_url: String,
        details: HeaderDetails,
        last_failure: Option<FailureKind>,
    ) -> Self {
        CheckResult {
            target: target.clone(),
            succeeded: true,
            attempts,
            response_time,
            content_length: details.content_length,
            redirect_url,
            server_header: details.server,
            content_type: details.content_type,
            ssl_enabled: details.ssl_enabled,
            last_failure,
        }
    }

    fn exhausted(target: &Target, attempts: u32, last_failure: Option<FailureKind>) -> Self {
        CheckResult {
            target: target.clone(),
            succeeded: false,
            attempts,
            response_time: Duration::ZERO,
            content_length: -1,
            redirect_url: String::new(),
            server_header: String::new(),
            content_type: String::new(),
            ssl_enabled: false,
            last_failure,
        }
    }
}

/// Checks `target` until it answers with `200 OK` or the attempts run out.
///
/// `on_failure` is called once per failed attempt, before the pause that
/// follows it. The client is expected to carry the request timeout of
/// `config` (see [`crate::network::build_client`]).
pub async fn check<F>(
    client: &Client,
    target: &Target,
    config: &CheckConfig,
    mut on_failure: F,
) -> CheckResult
where
    F: FnMut(&AttemptFailure),
{
    let mut last_failure = None;

    for attempt in 1..=config.max_retries {
        let start_time = Instant::now();

        let kind = match client.get(target.as_str()).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                let response_time = start_time.elapsed();
                info!(url = %target, attempt, ?response_time, "site is up");
                return CheckResult::up(
                    target,
                    attempt,
                    response_time,
                    response.url().to_string(),
                    HeaderDetails::from_headers(response.headers()),
                    last_failure,
                );
            }
            Ok(response) => FailureKind::Status(response.status().as_u16()),
            Err(e) => {
                debug!(url = %target, attempt, error = %e, "request error");
                FailureKind::from_error(&e)
            }
        };

        let retry_in = (attempt < config.max_retries).then_some(config.retry_interval);
        warn!(url = %target, attempt, reason = %kind, "site is down or not responding");
        on_failure(&AttemptFailure {
            attempt,
            kind,
            retry_in,
        });
        last_failure = Some(kind);

        if let Some(delay) = retry_in {
            tokio::time::sleep(delay).await;
        }
    }

    warn!(url = %target, attempts = config.max_retries, "max retries reached");
    CheckResult::exhausted(target, config.max_retries, last_failure)
}
