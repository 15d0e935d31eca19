//! Metrics definitions for the token service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `token_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `method`: 7 values max (GET, POST, PATCH, DELETE, PUT, HEAD, OPTIONS)
//! - `endpoint`: 6 values (known routes plus `/other`)
//! - `status`: 3 values (success, error, timeout)
//! - `operation`: bounded by code (issue_token, dispatch_agent)
//! - `error_type`: bounded by `ErrorCategory`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("token_http_request".to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.200, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        // HMAC signing is sub-millisecond; keep resolution at the low end
        .set_buckets_for_metric(
            Matcher::Prefix("token_issuance".to_string()),
            &[0.0001, 0.0005, 0.001, 0.002, 0.005, 0.010, 0.050],
        )
        .map_err(|e| format!("Failed to set token issuance buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `token_http_requests_total`, `token_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status`
///
/// Captures ALL HTTP responses, including extractor rejections (400, 422)
/// and unknown routes (404).
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("token_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.clone(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("token_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Normalize endpoint path to prevent label cardinality explosion
fn normalize_endpoint(path: &str) -> String {
    match path {
        "/" | "/health" | "/metrics" | "/token" | "/dispatch-agent" => path.to_string(),
        // Unknown paths normalized to "/other" to bound cardinality
        _ => "/other".to_string(),
    }
}

// ============================================================================
// Operation Metrics
// ============================================================================

/// Record token issuance
///
/// Metric: `token_issuance_total`, `token_issuance_duration_seconds`
/// Labels: `status`
pub fn record_token_issuance(status: &str, duration: Duration) {
    histogram!("token_issuance_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("token_issuance_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record dispatch acknowledgment outcome
///
/// Metric: `token_dispatch_ack_total`
/// Labels: `status`
pub fn record_dispatch_ack(status: &str) {
    counter!("token_dispatch_ack_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record error by category
///
/// Metric: `token_errors_total`
/// Labels: `operation`, `error_type`, `status_code`
pub fn record_error(operation: &str, error_type: &str, status_code: u16) {
    counter!("token_errors_total",
        "operation" => operation.to_string(),
        "error_type" => error_type.to_string(),
        "status_code" => status_code.to_string()
    )
    .increment(1);
}
