//! Runs the checker over every target and decides when a run stops.

use crate::checker::{AttemptFailure, CheckResult, check};
use crate::report::Summary;
use crate::resolver::{CheckConfig, Target};
use reqwest::Client;
use tokio::time::Instant;
use tracing::{info, warn};

/// What happens once a site exhausted its retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run, leaving the remaining sites unchecked.
    #[default]
    Abort,
    /// Check every site and summarize at the end.
    Continue,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Abort => "abort",
            FailurePolicy::Continue => "continue",
        }
    }
}

/// Receives progress while a run is going on.
pub trait Reporter {
    fn checking(&mut self, _target: &Target) {}

    fn attempt_failed(&mut self, _target: &Target, _failure: &AttemptFailure) {}

    fn finished(&mut self, _result: &CheckResult) {}
}

/// A reporter that stays silent, used for machine readable output.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Checks `targets` one after another, in order.
pub async fn run<R>(
    client: &Client,
    targets: Vec<Target>,
    config: &CheckConfig,
    policy: FailurePolicy,
    reporter: &mut R,
) -> Summary
where
    R: Reporter + ?Sized,
{
    let start_time = Instant::now();
    let mut results = Vec::with_capacity(targets.len());
    let mut remaining = targets.into_iter();

    for target in remaining.by_ref() {
        reporter.checking(&target);
        let result = check(client, &target, config, |failure| {
            reporter.attempt_failed(&target, failure)
        })
        .await;
        reporter.finished(&result);

        let failed = !result.succeeded;
        results.push(result);

        if failed && policy == FailurePolicy::Abort {
            warn!(url = %target, "aborting run after exhausted retries");
            break;
        }
    }

    let skipped: Vec<Target> = remaining.collect();
    info!(
        checked = results.len(),
        skipped = skipped.len(),
        "run finished"
    );

    Summary {
        config: *config,
        policy,
        total_time: start_time.elapsed(),
        results,
        skipped,
    }
}
