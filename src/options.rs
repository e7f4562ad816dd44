use crate::monitor::FailurePolicy;
use crate::network::ClientOptions;
use clap::{ArgAction, Parser, ValueHint};
use std::ffi::OsString;
use std::time::Duration;

/// Default values used throughout the project.
pub mod defaults {
    /// Number of attempts per site.
    pub const MAX_RETRIES: i64 = 3;

    /// Pause between two failed attempts.
    pub const RETRY_INTERVAL: &str = "5s";

    /// Upper bound for a single request.
    pub const REQUEST_TIMEOUT: &str = "10s";

    /// The default user agent header value used for network requests.
    pub const USER_AGENT: &str = concat!(
        "Mozilla/5.0 (compatible; Websentry/",
        env!("CARGO_PKG_VERSION"),
        ")"
    );
}

fn reject_flag_like(value: &str) -> Result<(), String> {
    if value.contains("--") {
        return Err(format!("'{}' is not a valid value.", value));
    }
    Ok(())
}

/// Accepts a comma separated list of sites. Values containing `--` are
/// rejected, they are almost always a flag that lost its value.
pub fn parse_site_list(value: &str) -> Result<String, String> {
    reject_flag_like(value)?;
    Ok(value.to_string())
}

/// Parses the number of attempts. Zero and negative numbers are let through
/// on purpose so they reach the resolver, which reports them properly.
pub fn parse_max_retries(value: &str) -> Result<i64, String> {
    reject_flag_like(value)?;
    value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number.", value))
}

/// Parses a duration written as one or more `<number><unit>` groups, e.g.
/// `5s`, `1m30s`, `1.5s` or `250ms`. Supported units are `ns`, `us` (`µs`),
/// `ms`, `s`, `m` and `h`. A bare number is read as seconds.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use websentry::options::parse_duration;
///
/// assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
/// assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
/// assert_eq!(parse_duration("7"), Ok(Duration::from_secs(7)));
/// assert!(parse_duration("5 parsecs").is_err());
/// ```
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    reject_flag_like(value)?;
    let invalid = || format!("'{}' is not a valid duration.", value);

    let input = value.trim();
    if input.is_empty() {
        return Err(invalid());
    }

    if let Ok(seconds) = input.parse::<f64>() {
        return Duration::try_from_secs_f64(seconds).map_err(|_| invalid());
    }

    let mut nanos = 0f64;
    let mut rest = input;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("'{}' is missing a unit.", value))?;
        if number_end == 0 {
            return Err(invalid());
        }
        let number: f64 = rest[..number_end].parse().map_err(|_| invalid())?;
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit_nanos = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            unit => {
                return Err(format!(
                    "Unknown unit '{}' in duration '{}'. Use ns, us, ms, s, m or h.",
                    unit, value
                ));
            }
        };
        nanos += number * unit_nanos;
        rest = &rest[unit_end..];
    }

    if nanos > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

/// Long flags that are also accepted with a single dash, e.g. `-site` or
/// `-maxretries=5`.
const SINGLE_DASH_FLAGS: &[&str] = &[
    "site",
    "maxretries",
    "maxretry",
    "retryinterval",
    "retryin",
    "requesttimeout",
    "help",
    "version",
];

/// Rewrites single-dash long flags to their double-dash form so clap can
/// parse them. Arguments after a bare `--` are left untouched.
///
/// ```rust
/// use std::ffi::OsString;
/// use websentry::options::normalize_args;
///
/// let args = normalize_args(["websentry", "-site=a.com", "-maxretries", "5"]);
/// assert_eq!(
///     args,
///     ["websentry", "--site=a.com", "--maxretries", "5"].map(OsString::from)
/// );
/// ```
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let is_single_dash_flag = text
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .map(|rest| rest.split_once('=').map_or(rest, |(name, _)| name))
                .is_some_and(|name| SINGLE_DASH_FLAGS.contains(&name));
            if is_single_dash_flag {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Websentry - Check the health of a website and report status",
    term_width = 80
)]
pub struct Cli {
    #[arg(
        long,
        env = "WEBSENTRY_SITE",
        value_name = "URLS",
        help = "Comma-separated list of website URLs. `https://` is assumed when no scheme is given.",
        value_hint = ValueHint::Url,
        value_parser = parse_site_list
    )]
    pub site: Option<String>,

    #[arg(
        long = "maxretries",
        visible_alias = "maxretry",
        value_name = "N",
        help = "Maximum number of attempts per website",
        default_value_t = defaults::MAX_RETRIES,
        allow_negative_numbers = true,
        value_parser = parse_max_retries
    )]
    pub max_retries: i64,

    #[arg(
        long = "retryinterval",
        visible_alias = "retryin",
        value_name = "DURATION",
        help = "Time to wait between retries, e.g. `5s`, `1m30s` or `500ms`",
        default_value = defaults::RETRY_INTERVAL,
        value_parser = parse_duration
    )]
    pub retry_interval: Duration,

    #[arg(
        long = "requesttimeout",
        value_name = "DURATION",
        help = "Timeout for a single HTTP request, connection setup included",
        default_value = defaults::REQUEST_TIMEOUT,
        value_parser = parse_duration
    )]
    pub request_timeout: Duration,

    #[arg(
        long,
        help = "Custom User-Agent header to be used in requests",
        default_value_t = defaults::USER_AGENT.to_string(),
    )]
    pub user_agent: String,

    #[arg(
        long,
        help = "Do not follow HTTP redirects. A redirect response then counts as a failed attempt."
    )]
    pub no_follow_redirects: bool,

    #[arg(
        short = 'k',
        long,
        help = "Keep checking the remaining websites after one exhausted its retries"
    )]
    pub keep_going: bool,

    #[arg(long, help = "Print a JSON summary to stdout instead of the text report")]
    pub json: bool,

    #[arg(
        short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity on stderr (-v, -vv, -vvv). `WEBSENTRY_LOG` takes precedence."
    )]
    pub verbose: u8,
}

impl Cli {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            user_agent: self.user_agent.clone(),
            follow_redirects: !self.no_follow_redirects,
        }
    }
}
