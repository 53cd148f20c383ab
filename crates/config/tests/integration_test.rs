//! Integration tests for provider configuration loading.
//!
//! These tests verify the precedence chain of the `ConfigLoader`:
//! provider block > environment variables > defaults.

use saviynt_config::constants::{
    ENV_PASSWORD, ENV_SKIP_VERIFY, ENV_URL, ENV_USERNAME, ENV_VERSION,
};
use saviynt_config::{ConfigError, ConfigLoader};
use secrecy::ExposeSecret;
use serial_test::serial;

#[test]
#[serial]
fn test_loader_reads_full_config_from_env() {
    temp_env::with_vars(
        [
            (ENV_URL, Some("https://acme.saviyntcloud.com")),
            (ENV_USERNAME, Some("svc-terraform")),
            (ENV_PASSWORD, Some("env-password")),
            (ENV_VERSION, Some("25.1")),
            (ENV_SKIP_VERIFY, Some("true")),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .expect("env should parse")
                .build()
                .expect("should build from env");

            assert_eq!(config.server_url, "https://acme.saviyntcloud.com");
            assert_eq!(config.username, "svc-terraform");
            assert_eq!(config.password.expose_secret(), "env-password");
            assert_eq!(config.saviynt_version.as_deref(), Some("25.1"));
            assert!(config.skip_verify);
        },
    );
}

#[test]
#[serial]
fn test_provider_block_overrides_env() {
    temp_env::with_vars(
        [
            (ENV_URL, Some("https://env.saviyntcloud.com")),
            (ENV_USERNAME, Some("env-user")),
            (ENV_PASSWORD, Some("env-password")),
        ],
        || {
            let config = ConfigLoader::new()
                .with_server_url("https://block.saviyntcloud.com")
                .with_password("block-password")
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.server_url, "https://block.saviyntcloud.com");
            assert_eq!(config.username, "env-user");
            assert_eq!(config.password.expose_secret(), "block-password");
        },
    );
}

#[test]
#[serial]
fn test_missing_env_reports_missing_url() {
    temp_env::with_vars(
        [
            (ENV_URL, None::<&str>),
            (ENV_USERNAME, None),
            (ENV_PASSWORD, None),
        ],
        || {
            let err = ConfigLoader::new().from_env().unwrap().build().unwrap_err();
            assert!(matches!(err, ConfigError::MissingBaseUrl));
        },
    );
}

#[test]
#[serial]
fn test_invalid_skip_verify_is_reported_with_variable_name() {
    temp_env::with_vars([(ENV_SKIP_VERIFY, Some("maybe"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_SKIP_VERIFY));
    });
}
