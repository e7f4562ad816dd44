use std::process::Command;
use std::time::Duration;
use websentry::checker::{CheckResult, FailureKind};
use websentry::monitor::FailurePolicy;
use websentry::report::Summary;
use websentry::resolver::{CheckConfig, Target};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_websentry(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_websentry"))
        .args(args)
        .env_remove("WEBSENTRY_SITE")
        .env_remove("WEBSENTRY_LOG")
        .output()
        .expect("Failed to execute websentry binary")
}

fn sample_summary() -> Summary {
    Summary {
        config: CheckConfig {
            max_retries: 2,
            retry_interval: Duration::from_millis(1500),
            request_timeout: Duration::from_secs(10),
        },
        policy: FailurePolicy::Abort,
        total_time: Duration::from_millis(2500),
        results: vec![
            CheckResult {
                target: Target::resolve("up.example.com"),
                succeeded: true,
                attempts: 1,
                response_time: Duration::from_millis(84),
                content_length: -1,
                redirect_url: "https://up.example.com/".to_string(),
                server_header: "nginx".to_string(),
                content_type: "text/html".to_string(),
                ssl_enabled: true,
                last_failure: None,
            },
            CheckResult {
                target: Target::resolve("down.example.com"),
                succeeded: false,
                attempts: 2,
                response_time: Duration::ZERO,
                content_length: -1,
                redirect_url: String::new(),
                server_header: String::new(),
                content_type: String::new(),
                ssl_enabled: false,
                last_failure: Some(FailureKind::Status(503)),
            },
        ],
        skipped: vec![Target::resolve("later.example.com")],
    }
}

#[test]
fn test_json_summary_structure() {
    let json: serde_json::Value =
        serde_json::from_str(&sample_summary().to_json_string().unwrap()).unwrap();

    assert_eq!(json["config"]["maxRetries"], 2);
    assert_eq!(json["config"]["retryIntervalMs"], 1500);
    assert_eq!(json["config"]["requestTimeoutMs"], 10000);
    assert_eq!(json["config"]["failurePolicy"], "abort");
    assert_eq!(json["elapsedTimeMs"], 2500);

    let results = json["results"].as_array().expect("results should be an array");
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["url"], "https://up.example.com");
    assert_eq!(results[0]["succeeded"], true);
    assert_eq!(results[0]["responseTimeMs"], 84);
    assert_eq!(results[0]["contentLength"], -1);
    assert_eq!(results[0]["server"], "nginx");
    assert_eq!(results[0]["sslEnabled"], true);
    assert!(results[0]["lastFailure"].is_null());

    assert_eq!(results[1]["succeeded"], false);
    assert_eq!(results[1]["attempts"], 2);
    assert_eq!(results[1]["lastFailure"]["kind"], "status");
    assert_eq!(results[1]["lastFailure"]["status"], 503);

    assert_eq!(json["skipped"][0], "https://later.example.com");
}

#[test]
fn test_json_failure_kind_without_status() {
    let mut summary = sample_summary();
    summary.results[1].last_failure = Some(FailureKind::Timeout);

    let json: serde_json::Value =
        serde_json::from_str(&summary.to_json_string().unwrap()).unwrap();
    assert_eq!(json["results"][1]["lastFailure"]["kind"], "timeout");
}

#[tokio::test]
async fn test_json_flag_prints_only_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).insert_header("Server", "mock"))
        .mount(&server)
        .await;

    let site = format!("{}/health", server.uri());
    let output = run_websentry(&["--site", &site, "--json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(json["results"][0]["url"], site.as_str());
    assert_eq!(json["results"][0]["succeeded"], true);
    assert_eq!(json["results"][0]["server"], "mock");
}

#[tokio::test]
async fn test_json_flag_reports_failure_with_exit_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let output = run_websentry(&[
        "--site",
        &server.uri(),
        "--json",
        "--maxretries",
        "2",
        "--retryinterval",
        "10ms",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(json["results"][0]["attempts"], 2);
    assert_eq!(json["results"][0]["lastFailure"]["status"], 500);
}
