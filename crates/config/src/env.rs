//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SAVIYNT_*` environment variables into a [`ConfigLoader`].
//! - Expose the acceptance-test marker (`TF_ACC`) check.
//!
//! Does NOT handle:
//! - Building the final [`ProviderConfig`](crate::ProviderConfig) (see loader.rs).
//! - .env file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric/boolean values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::time::Duration;

use crate::constants::{
    ENV_ACCEPTANCE_TEST, ENV_PASSWORD, ENV_SKIP_VERIFY, ENV_TIMEOUT, ENV_URL, ENV_USERNAME,
    ENV_VERSION,
};
use crate::error::ConfigError;
use crate::loader::ConfigLoader;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// True when the host runs acceptance tests (`TF_ACC=1`).
///
/// Only the literal value `1` enables acceptance mode.
pub fn is_acceptance_test() -> bool {
    env_var_or_none(ENV_ACCEPTANCE_TEST).as_deref() == Some("1")
}

/// Fill loader fields that are still unset from the environment.
///
/// Explicit provider-block values always win, so this never overwrites a
/// value that is already present.
pub(crate) fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.server_url().is_none()
        && let Some(url) = env_var_or_none(ENV_URL)
    {
        loader.set_server_url(Some(url));
    }
    if loader.username().is_none()
        && let Some(username) = env_var_or_none(ENV_USERNAME)
    {
        loader.set_username(Some(username));
    }
    if !loader.has_password()
        && let Some(password) = env_var_or_none(ENV_PASSWORD)
    {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if loader.saviynt_version().is_none()
        && let Some(version) = env_var_or_none(ENV_VERSION)
    {
        loader.set_saviynt_version(Some(version));
    }
    if loader.timeout().is_none()
        && let Some(timeout) = env_var_or_none(ENV_TIMEOUT)
    {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if loader.skip_verify().is_none()
        && let Some(skip) = env_var_or_none(ENV_SKIP_VERIFY)
    {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: ENV_SKIP_VERIFY.to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_SAVIYNT_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none());
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(env_var_or_none(key1).is_none());
        });

        let key2 = "_SAVIYNT_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(env_var_or_none(key2), Some("test-value".to_string()));
        });
    }

    #[test]
    #[serial]
    fn test_acceptance_marker_requires_literal_one() {
        temp_env::with_vars([(ENV_ACCEPTANCE_TEST, Some("1"))], || {
            assert!(is_acceptance_test());
        });
        temp_env::with_vars([(ENV_ACCEPTANCE_TEST, Some("true"))], || {
            assert!(!is_acceptance_test());
        });
        temp_env::with_vars([(ENV_ACCEPTANCE_TEST, Some(" "))], || {
            assert!(!is_acceptance_test());
        });
        temp_env::with_vars([(ENV_ACCEPTANCE_TEST, None::<&str>)], || {
            assert!(!is_acceptance_test());
        });
    }

    #[test]
    #[serial]
    fn test_apply_env_rejects_bad_timeout() {
        temp_env::with_vars([(ENV_TIMEOUT, Some("soon"))], || {
            let mut loader = ConfigLoader::new();
            let err = apply_env(&mut loader).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == ENV_TIMEOUT));
        });
    }

    #[test]
    #[serial]
    fn test_apply_env_does_not_override_explicit_values() {
        temp_env::with_vars(
            [
                (ENV_URL, Some("https://env.saviyntcloud.com")),
                (ENV_USERNAME, Some("env-user")),
            ],
            || {
                let mut loader =
                    ConfigLoader::new().with_server_url("https://explicit.saviyntcloud.com");
                apply_env(&mut loader).unwrap();
                assert_eq!(
                    loader.server_url().map(String::as_str),
                    Some("https://explicit.saviyntcloud.com")
                );
                assert_eq!(loader.username().map(String::as_str), Some("env-user"));
            },
        );
    }
}
