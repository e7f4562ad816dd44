use std::time::Duration;
use websentry::checker::CheckResult;
use websentry::metrics::Metrics;
use websentry::resolver::Target;

fn up_result() -> CheckResult {
    CheckResult {
        target: Target::resolve("example.com"),
        succeeded: true,
        attempts: 2,
        response_time: Duration::from_micros(84_126),
        content_length: 1256,
        redirect_url: "https://www.example.com/".to_string(),
        server_header: "ECS (nyb/1D2E)".to_string(),
        content_type: "text/html; charset=UTF-8".to_string(),
        ssl_enabled: true,
        last_failure: None,
    }
}

#[test]
fn test_metrics_for_result() {
    let metrics = Metrics::for_result(&up_result());

    assert_eq!(metrics.value("Response Time"), Some("84.13ms"));
    assert_eq!(metrics.value("Content Length"), Some("1256 bytes"));
    assert_eq!(metrics.value("Redirect URL"), Some("https://www.example.com/"));
    assert_eq!(metrics.value("Server"), Some("ECS (nyb/1D2E)"));
    assert_eq!(metrics.value("Content Type"), Some("text/html; charset=UTF-8"));
    assert_eq!(metrics.value("SSL Enabled"), Some("Yes"));
    assert_eq!(metrics.value("Attempts"), Some("2"));
    assert_eq!(metrics.value("Nope"), None);
}

#[test]
fn test_metrics_for_sparse_response() {
    let mut result = up_result();
    result.content_length = -1;
    result.server_header = String::new();
    result.content_type = String::new();
    result.ssl_enabled = false;

    let metrics = Metrics::for_result(&result);
    assert_eq!(metrics.value("Content Length"), Some("unknown"));
    assert_eq!(metrics.value("Server"), Some("-"));
    assert_eq!(metrics.value("Content Type"), Some("-"));
    assert_eq!(metrics.value("SSL Enabled"), Some("No"));
}

#[test]
fn test_long_redirect_url_is_truncated() {
    let mut result = up_result();
    result.redirect_url = format!("https://example.com/{}", "a".repeat(200));

    let metrics = Metrics::for_result(&result);
    let shown = metrics.value("Redirect URL").unwrap();
    assert_eq!(shown.chars().count(), 60);
    assert!(shown.ends_with('…'));
}

#[test]
fn test_build_table_contains_labels_and_values() {
    let table = Metrics::for_result(&up_result()).build_table();

    assert!(table.contains("Response Time"));
    assert!(table.contains("1256 bytes"));
    assert!(table.contains("ECS (nyb/1D2E)"));
    assert!(table.starts_with('┌'));
    assert!(table.trim_end().ends_with('┘'));
}
