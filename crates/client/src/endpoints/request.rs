//! Request execution and HTTP status mapping.
//!
//! Responsibilities:
//! - Send a prepared request, recording per-endpoint metrics.
//! - Map HTTP 401 to [`ClientError::Unauthorized`] and every other
//!   non-success status to [`ClientError::ApiError`].
//! - Decode JSON bodies into typed responses.
//!
//! Invariants:
//! - Status is classified before the body is decoded. A 401 stays
//!   `Unauthorized` whether or not its body parses as a Saviynt envelope;
//!   a parsed envelope only contributes the message.
//! - A 2xx body that fails to decode is [`ClientError::InvalidResponse`],
//!   never `Unauthorized`, so it is not retried.
//!
//! Does NOT handle:
//! - Retrying. Token-expiry retries live in the caller's retry harness and
//!   nothing here retries on any status.

use std::time::Instant;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ApiStatus;

/// Send a request and map non-success statuses to errors.
pub(crate) async fn send_request(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let started = Instant::now();
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }

    let result = execute(builder).await;

    if let Some(m) = metrics {
        let status = match &result {
            Ok(resp) => Some(resp.status().as_u16()),
            Err(e) => e.status(),
        };
        m.record_request_duration(endpoint, method, started.elapsed(), status);
        if let Err(e) = &result {
            m.record_client_error(endpoint, method, e);
        }
    }

    result
}

async fn execute(builder: RequestBuilder) -> Result<Response> {
    let response = crate::tracing::inject_trace_context(builder).send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    let message = server_message(&body);

    debug!(status = status.as_u16(), url = %url, "Saviynt returned non-success status");

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized { url, message });
    }

    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
    })
}

/// Prefer the `msg` of a Saviynt status envelope over the raw body.
fn server_message(body: &str) -> String {
    match serde_json::from_str::<ApiStatus>(body) {
        Ok(status) if !status.msg.is_empty() => status.msg,
        _ => body.trim().to_string(),
    }
}

/// Read the body and decode it as JSON.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ClientError::InvalidResponse(format!("failed to decode response: {}", e)))
}
