//! Error types for the Saviynt client.
//!
//! Invariants:
//! - HTTP 401 is always surfaced as [`ClientError::Unauthorized`], never as
//!   [`ClientError::ApiError`], so callers can recognise token expiry.
//! - Error messages carry the server message and URL but never request bodies.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Saviynt client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Login failed (bad credentials or unexpected login response).
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The bearer token was rejected (HTTP 401).
    #[error("Unauthorized at {url}: {message}")]
    Unauthorized { url: String, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success HTTP status from Saviynt.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// True when the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_) | Self::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_reports_401() {
        let err = ClientError::Unauthorized {
            url: "https://tenant/ECM/api/v5/getConnectionDetails".to_string(),
            message: "token expired".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_api_error_is_not_unauthorized() {
        let err = ClientError::ApiError {
            status: 412,
            url: "https://tenant/ECM/api/v5/getConnectionDetails".to_string(),
            message: "Connection not found".to_string(),
        };
        assert!(!err.is_unauthorized());
        assert!(!err.is_auth_error());
        assert_eq!(err.status(), Some(412));
    }

    #[test]
    fn test_auth_failed_has_no_status() {
        let err = ClientError::AuthFailed("bad credentials".to_string());
        assert!(err.is_auth_error());
        assert_eq!(err.status(), None);
    }
}
