//! Host-facing state models for connector resources.
//!
//! Responsibilities:
//! - [`ConnectorModel`]: plan/state of one connector instance, common fields
//!   typed, kind-specific attributes keyed by logical name.
//! - [`ConnectorConfig`]: the config channel carrying write-only secrets.
//! - [`TimeoutConfig`]: the nested HTTP timeout record.
//!
//! Invariants:
//! - Secret attribute values live only in [`ConnectorConfig`]; a state
//!   model never holds them.
//! - `ConnectorConfig`'s `Debug` prints secret names, never values.

use std::collections::BTreeMap;
use std::fmt;

use saviynt_client::ConnectionTimeoutConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::value::{Attr, AttrValue};

static UNKNOWN_ATTRIBUTE: Attr<AttrValue> = Attr::Unknown;

/// Nested HTTP timeout and retry settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeoutConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_wait: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_wait_max_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_timeout: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_failure_status_code: Option<i64>,
}

impl From<ConnectionTimeoutConfig> for TimeoutConfig {
    fn from(wire: ConnectionTimeoutConfig) -> Self {
        Self {
            retry_wait: wire.retry_wait,
            max_retries: wire.max_retries,
            retry_wait_max_value: wire.retry_wait_max_value,
            retry_count: wire.retry_count,
            read_timeout: wire.read_timeout,
            connection_timeout: wire.connection_timeout,
            retry_failure_status_code: wire.retry_failure_status_code,
        }
    }
}

impl From<&TimeoutConfig> for ConnectionTimeoutConfig {
    fn from(state: &TimeoutConfig) -> Self {
        Self {
            retry_wait: state.retry_wait,
            max_retries: state.max_retries,
            retry_wait_max_value: state.retry_wait_max_value,
            retry_count: state.retry_count,
            read_timeout: state.read_timeout,
            connection_timeout: state.connection_timeout,
            retry_failure_status_code: state.retry_failure_status_code,
        }
    }
}

/// Plan or state of a connector resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorModel {
    /// `<idPrefix>-<connectionKey>`.
    pub id: Attr<String>,
    pub connection_key: Attr<i64>,
    pub connection_name: Attr<String>,
    /// Saviynt `connectiontype`; computed from the descriptor.
    pub connection_type: Attr<String>,
    pub description: Attr<String>,
    pub defaultsavroles: Attr<String>,
    pub email_template: Attr<String>,
    pub vault_connection: Attr<String>,
    pub vault_configuration: Attr<String>,
    pub save_in_vault: Attr<String>,
    pub msg: Attr<String>,
    /// Server error code rendered as a string ("0" on success).
    pub error_code: Attr<String>,
    /// Kind-specific attributes by logical name. Absent means unknown.
    pub attributes: BTreeMap<String, Attr<AttrValue>>,
}

impl ConnectorModel {
    /// A plan that only names the connection.
    pub fn named(connection_name: impl Into<String>) -> Self {
        Self {
            connection_name: Attr::Value(connection_name.into()),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, logical_name: &str, value: impl Into<AttrValue>) -> Self {
        self.set_attribute(logical_name, Attr::Value(value.into()));
        self
    }

    pub fn attribute(&self, logical_name: &str) -> &Attr<AttrValue> {
        self.attributes
            .get(logical_name)
            .unwrap_or(&UNKNOWN_ATTRIBUTE)
    }

    pub fn set_attribute(&mut self, logical_name: &str, value: Attr<AttrValue>) {
        self.attributes.insert(logical_name.to_string(), value);
    }

    /// String value of a kind-specific attribute, if set.
    pub fn attribute_str(&self, logical_name: &str) -> Option<&str> {
        self.attribute(logical_name).value().and_then(AttrValue::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.connection_name.as_deref()
    }

    /// True when any of the vault trio carries a value.
    pub fn has_vault_settings(&self) -> bool {
        self.vault_connection.is_set()
            || self.vault_configuration.is_set()
            || self.save_in_vault.is_set()
    }
}

/// Config channel: values the host withholds from the plan.
#[derive(Clone, Default)]
pub struct ConnectorConfig {
    secrets: BTreeMap<String, SecretString>,
}

impl ConnectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, logical_name: &str, value: impl Into<String>) -> Self {
        self.secrets.insert(
            logical_name.to_string(),
            SecretString::new(value.into().into()),
        );
        self
    }

    pub fn secret(&self, logical_name: &str) -> Option<&SecretString> {
        self.secrets.get(logical_name)
    }

    /// Every secret value, for seeding a sanitizer.
    pub fn secret_values(&self) -> impl Iterator<Item = SecretString> + '_ {
        self.secrets.values().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("secrets", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_is_unknown() {
        let model = ConnectorModel::named("acc_rest_1");
        assert!(model.attribute("import_user_json").is_unknown());
        assert_eq!(model.name(), Some("acc_rest_1"));
    }

    #[test]
    fn test_with_attribute_sets_value() {
        let model = ConnectorModel::named("x").with_attribute("import_user_json", "{}");
        assert_eq!(model.attribute_str("import_user_json"), Some("{}"));
    }

    #[test]
    fn test_vault_settings_detection() {
        let mut model = ConnectorModel::named("x");
        assert!(!model.has_vault_settings());
        model.vault_configuration = Attr::Null;
        assert!(!model.has_vault_settings());
        model.save_in_vault = Attr::Value("true".to_string());
        assert!(model.has_vault_settings());
    }

    #[test]
    fn test_config_debug_hides_values() {
        let config = ConnectorConfig::new().with_secret("password", "hunter2");
        let debug = format!("{:?}", config);
        assert!(debug.contains("password"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_timeout_config_wire_conversion() {
        let wire = ConnectionTimeoutConfig {
            read_timeout: Some(60),
            retry_count: Some(3),
            ..Default::default()
        };
        let state = TimeoutConfig::from(wire.clone());
        assert_eq!(state.read_timeout, Some(60));
        assert_eq!(ConnectionTimeoutConfig::from(&state), wire);
    }

    #[test]
    fn test_timeout_config_as_attr_value() {
        let value: AttrValue = serde_json::from_str(r#"{"read_timeout": 30}"#).unwrap();
        assert_eq!(
            value,
            AttrValue::Timeout(TimeoutConfig {
                read_timeout: Some(30),
                ..Default::default()
            })
        );
    }
}
