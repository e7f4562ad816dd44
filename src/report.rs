use crate::checker::{AttemptFailure, CheckResult};
use crate::metrics::Metrics;
use crate::monitor::{FailurePolicy, Reporter};
use crate::resolver::{CheckConfig, Target};
use crate::utils;
use console::style;
use serde_json::json;
use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

const RULE: &str = "----------------------------------------";

/// Everything a run produced, in input order.
#[derive(Debug)]
pub struct Summary {
    pub config: CheckConfig,
    pub policy: FailurePolicy,
    pub total_time: Duration,
    pub results: Vec<CheckResult>,
    /// Sites that were never checked because the run was aborted.
    pub skipped: Vec<Target>,
}

impl Summary {
    pub fn failed(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.succeeded)
    }

    /// `1` as soon as one site exhausted its retries, `0` otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.failed().next().is_some() {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }

    pub fn show_text_summary(&self) {
        if self.results.len() + self.skipped.len() <= 1 {
            return;
        }

        let up = self.results.iter().filter(|r| r.succeeded).count();
        let down = self.results.len() - up;
        println!(
            "\n{} {} up, {} down, {} skipped {}",
            style("Summary:").bold(),
            style(up).green(),
            style(down).red(),
            style(self.skipped.len()).dim(),
            style(format!("({:.2?})", self.total_time)).dim()
        );
        for target in &self.skipped {
            println!("{} {}", style("Not checked:").dim(), target);
        }
    }

    fn build_json_data(&self) -> serde_json::Value {
        json!({
            "config": {
                "maxRetries": self.config.max_retries,
                "retryIntervalMs": self.config.retry_interval.as_millis(),
                "requestTimeoutMs": self.config.request_timeout.as_millis(),
                "failurePolicy": self.policy.as_str(),
            },
            "elapsedTimeMs": self.total_time.as_millis(),
            "results": self.results.iter().map(|r| {
                json!({
                    "url": r.target,
                    "succeeded": r.succeeded,
                    "attempts": r.attempts,
                    "responseTimeMs": r.response_time.as_millis(),
                    "contentLength": r.content_length,
                    "redirectUrl": r.redirect_url,
                    "server": r.server_header,
                    "contentType": r.content_type,
                    "sslEnabled": r.ssl_enabled,
                    "lastFailure": r.last_failure,
                })
            }).collect::<Vec<serde_json::Value>>(),
            "skipped": self.skipped,
        })
    }

    /// Returns the JSON report as a pretty-printed string.
    pub fn to_json_string(&self) -> Result<String, Box<dyn Error>> {
        Ok(serde_json::to_string_pretty(&self.build_json_data())?)
    }
}

/// Prints progress the way a person watching the terminal wants to see it.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn checking(&mut self, target: &Target) {
        println!("{}", style(RULE).magenta());
        println!("Checking the health of {}...", style(target).bold());
        println!("{}", style(RULE).magenta());
    }

    fn attempt_failed(&mut self, target: &Target, failure: &AttemptFailure) {
        println!(
            "{}",
            style(format!(
                "Attempt {}: Website {} is down or not responding ({}).",
                failure.attempt, target, failure.kind
            ))
            .red()
        );
        match failure.retry_in {
            Some(delay) => println!("Retrying in {}...", utils::human_duration(delay)),
            None => println!("Max retries reached. Website is still down."),
        }
    }

    fn finished(&mut self, result: &CheckResult) {
        if !result.succeeded {
            return;
        }
        println!("✅ Website {} is up and running\n", result.target);
        println!("{}", Metrics::for_result(result).build_table());
    }
}

/// Shown when no site was given.
pub fn show_usage_hint() {
    println!("{}", style("No websites specified. Example commands:").red());
    println!(
        "$ websentry --site https://example.com --maxretries 5 --retryinterval 10s --requesttimeout 15s"
    );
    println!(
        "$ websentry --site https://example.com,https://example2.com,https://example3.com --maxretries 5 --retryinterval 10s --requesttimeout 15s"
    );
}
