//! Metrics collection for Saviynt API calls.
//!
//! This module provides metrics collection for Saviynt API calls, including:
//! - Request latency histograms
//! - Request and error counters
//! - Token refresh counters
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a recorder in the host process)
//! - Alerting or threshold monitoring
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible and never disrupts API calls
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "saviynt_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "saviynt_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "saviynt_api_errors_total";

/// Metric name for bearer-token refresh counter.
pub const METRIC_AUTH_REFRESH_TOTAL: &str = "saviynt_auth_refresh_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// Token rejected or login failed
    Auth,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Body did not match the expected shape
    Decode,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::AuthFailed(_) | ClientError::Unauthorized { .. } => ErrorCategory::Auth,
            ClientError::ApiError { status, .. } if (400..500).contains(status) => {
                ErrorCategory::Http4xx
            }
            ClientError::ApiError { status, .. } if (500..600).contains(status) => {
                ErrorCategory::Http5xx
            }
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ErrorCategory::Transport
            }
            ClientError::HttpError(e) if e.is_decode() => ErrorCategory::Decode,
            ClientError::InvalidResponse(_) => ErrorCategory::Decode,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Saviynt API calls.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent
/// labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record an error, categorised from the client error.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => ErrorCategory::from(error).as_str(),
        )
        .increment(1);
    }

    /// Record one bearer-token refresh.
    pub fn record_auth_refresh(&self, outcome: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_AUTH_REFRESH_TOTAL, "outcome" => outcome).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        let unauthorized = ClientError::Unauthorized {
            url: "test".to_string(),
            message: "expired".to_string(),
        };
        assert_eq!(ErrorCategory::from(&unauthorized), ErrorCategory::Auth);

        let api_412 = ClientError::ApiError {
            status: 412,
            url: "test".to_string(),
            message: "precondition".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_412), ErrorCategory::Http4xx);

        let api_503 = ClientError::ApiError {
            status: 503,
            url: "test".to_string(),
            message: "down".to_string(),
        };
        assert_eq!(ErrorCategory::from(&api_503), ErrorCategory::Http5xx);

        let decode = ClientError::InvalidResponse("bad json".to_string());
        assert_eq!(ErrorCategory::from(&decode), ErrorCategory::Decode);
    }

    #[test]
    fn test_disabled_collector_records_nothing() {
        let collector = MetricsCollector::disabled();
        assert!(!collector.is_enabled());
        collector.record_request("/getConnections", "GET");
        collector.record_auth_refresh("success");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let collector = MetricsCollector::new();
        collector.record_request_duration(
            "/getConnectionDetails",
            "POST",
            Duration::from_millis(12),
            Some(200),
        );
        collector.record_client_error(
            "/getConnectionDetails",
            "POST",
            &ClientError::InvalidResponse("x".to_string()),
        );
    }
}
