//! Client builder for constructing [`SaviyntClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, username, password)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`SaviyntClient`] methods in `mod.rs`)
//! - Token refresh (handled by the provider's retry harness)
//!
//! # Invariants
//! - `base_url`, `username` and `password` must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use secrecy::SecretString;
use std::time::Duration;

use crate::client::SaviyntClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use saviynt_config::ProviderConfig;
use saviynt_config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};

/// Builder for creating a new [`SaviyntClient`].
///
/// # Example
///
/// ```rust,ignore
/// use saviynt_client::SaviyntClient;
/// use secrecy::SecretString;
///
/// let client = SaviyntClient::builder()
///     .base_url("https://tenant.saviyntcloud.com".to_string())
///     .username("admin".to_string())
///     .password(SecretString::new("pw".to_string().into()))
///     .build()?;
/// ```
pub struct SaviyntClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    skip_verify: bool,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
}

impl Default for SaviyntClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            metrics: None,
        }
    }
}

impl SaviyntClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Saviynt tenant.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the login username.
    pub fn username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against development tenants with self-signed certificates.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the metrics collector for API call performance tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pre-populate the builder from a resolved provider configuration.
    pub fn from_config(mut self, config: &ProviderConfig) -> Self {
        self.base_url = Some(config.server_url.clone());
        self.username = Some(config.username.clone());
        self.password = Some(config.password.clone());
        self.skip_verify = config.skip_verify;
        self.timeout = config.timeout;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`SaviyntClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`ClientError::AuthFailed`] if username or password is missing.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<SaviyntClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is empty".to_string()));
        }

        let username = self
            .username
            .ok_or_else(|| ClientError::AuthFailed("username is required".to_string()))?;
        let password = self
            .password
            .ok_or_else(|| ClientError::AuthFailed("password is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(SaviyntClient {
            http,
            base_url,
            username,
            password,
            metrics: self.metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProviderConfig {
        ProviderConfig {
            server_url: "https://tenant.saviyntcloud.com/".to_string(),
            username: "admin".to_string(),
            password: SecretString::new("pw".to_string().into()),
            saviynt_version: None,
            timeout: Duration::from_secs(120),
            skip_verify: true,
        }
    }

    #[test]
    fn test_from_config_normalizes_base_url() {
        let client = SaviyntClient::builder().from_config(&config()).build().unwrap();
        assert_eq!(client.base_url(), "https://tenant.saviyntcloud.com");
        assert_eq!(client.username(), "admin");
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let builder = SaviyntClient::builder().from_config(&config());
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert!(builder.skip_verify);
    }

    #[test]
    fn test_missing_base_url_is_rejected() {
        let err = SaviyntClient::builder()
            .username("admin".to_string())
            .password(SecretString::new("pw".to_string().into()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let err = SaviyntClient::builder()
            .base_url("https://tenant".to_string())
            .username("admin".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::AuthFailed(_)));
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let client = SaviyntClient::builder().from_config(&config()).build().unwrap();
        assert!(!format!("{:?}", client).contains("\"pw\""));
    }
}
