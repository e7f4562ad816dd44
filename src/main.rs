use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use console::style;
use websentry::monitor::{self, SilentReporter};
use websentry::report::{self, ConsoleReporter};
use websentry::resolver::{self, ConfigError};
use websentry::{logging, network, options};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Parse terminal arguments.
    let options = options::Cli::parse_from(options::normalize_args(std::env::args_os()));
    logging::init(options.verbose);

    // Resolve the site list and validate retry settings.
    let resolved = resolver::resolve(
        options.site.as_deref().unwrap_or_default(),
        options.max_retries,
        options.retry_interval,
        options.request_timeout,
    );
    let (targets, config) = match resolved {
        Ok(resolved) => resolved,
        Err(ConfigError::NoSites) => {
            report::show_usage_hint();
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("{} {}", style("[ERROR]").red(), e);
            return Ok(ExitCode::from(2));
        }
    };

    // Build the HTTP client, shared by every attempt.
    let client = network::build_client(&config, &options.client_options())?;
    let policy = options.failure_policy();

    if options.json {
        // Print clean JSON to stdout for piping.
        let summary = monitor::run(&client, targets, &config, policy, &mut SilentReporter).await;
        println!("{}", summary.to_json_string()?);
        Ok(summary.exit_code())
    } else {
        let summary = monitor::run(&client, targets, &config, policy, &mut ConsoleReporter).await;
        summary.show_text_summary();
        Ok(summary.exit_code())
    }
}
