//! Configuration loader builder.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges provider-block
//!   values, environment variables and `.env` files.
//! - Validate and normalize the server URL and timeout.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Logging in to Saviynt (see the client crate).
//!
//! Invariants / Assumptions:
//! - Builder methods (provider block) take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - A URL without a scheme is treated as `https://`.

use secrecy::SecretString;
use std::time::Duration;
use tracing::debug;

use crate::constants::{DEFAULT_TIMEOUT_SECS, ENV_DOTENV_DISABLED, MAX_TIMEOUT_SECS};
use crate::env::apply_env;
use crate::error::ConfigError;
use crate::types::ProviderConfig;

/// Configuration loader that builds a [`ProviderConfig`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    server_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    saviynt_version: Option<String>,
    timeout: Option<Duration>,
    skip_verify: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// Missing `.env` files are silently ignored. Error messages never
    /// include raw .env line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(dotenvy::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                Ok(self)
            }
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Fill unset values from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the server URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::new(password.into().into()));
        self
    }

    /// Set the Saviynt server version.
    pub fn with_saviynt_version(mut self, version: impl Into<String>) -> Self {
        self.saviynt_version = Some(version.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        let server_url = self
            .server_url
            .as_deref()
            .map(validate_and_normalize_server_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let (Some(username), Some(password)) = (self.username, self.password) else {
            return Err(ConfigError::MissingAuth);
        };

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        validate_timeout(timeout)?;

        Ok(ProviderConfig {
            server_url,
            username,
            password,
            saviynt_version: self.saviynt_version,
            timeout,
            skip_verify: self.skip_verify.unwrap_or(false),
        })
    }

    pub(crate) fn server_url(&self) -> Option<&String> {
        self.server_url.as_ref()
    }

    pub(crate) fn username(&self) -> Option<&String> {
        self.username.as_ref()
    }

    pub(crate) fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub(crate) fn saviynt_version(&self) -> Option<&String> {
        self.saviynt_version.as_ref()
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn skip_verify(&self) -> Option<bool> {
        self.skip_verify
    }

    pub(crate) fn set_server_url(&mut self, url: Option<String>) {
        self.server_url = url;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_saviynt_version(&mut self, version: Option<String>) {
        self.saviynt_version = version;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }
}

fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    let secs = timeout.as_secs();
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(())
}

fn validate_and_normalize_server_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    // Saviynt tenants are commonly configured as a bare host name.
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = url::Url::parse(&with_scheme).map_err(|e| ConfigError::InvalidValue {
        var: "server_url".into(),
        message: format!("must be an absolute http(s) URL with a host: {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "server_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "server_url".into(),
            message: "host is required (e.g. https://tenant.saviyntcloud.com)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn complete() -> ConfigLoader {
        ConfigLoader::new()
            .with_server_url("https://tenant.saviyntcloud.com/")
            .with_username("admin")
            .with_password("secret")
    }

    #[test]
    fn test_build_normalizes_trailing_slash() {
        let config = complete().build().unwrap();
        assert_eq!(config.server_url, "https://tenant.saviyntcloud.com");
        assert_eq!(config.password.expose_secret(), "secret");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!config.skip_verify);
    }

    #[test]
    fn test_bare_host_gets_https_scheme() {
        let config = complete()
            .with_server_url("tenant.saviyntcloud.com")
            .build()
            .unwrap();
        assert_eq!(config.server_url, "https://tenant.saviyntcloud.com");
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let err = ConfigLoader::new()
            .with_username("admin")
            .with_password("secret")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let err = ConfigLoader::new()
            .with_server_url("https://tenant.saviyntcloud.com")
            .with_username("admin")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingAuth));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let err = complete()
            .with_server_url("ftp://tenant.saviyntcloud.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = complete()
            .with_timeout(Duration::from_secs(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_oversized_timeout_is_rejected() {
        let err = complete()
            .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }
}
