//! Connection models for the Saviynt v5 connection endpoints.
//!
//! Responsibilities:
//! - The create/update request body, discriminated by `connectiontype`.
//! - The connection-details response as a tagged variant: one enum variant
//!   per connection type, each carrying the same typed payload.
//! - Connection listing models.
//!
//! Does NOT handle:
//! - Which attributes a connection type accepts (the provider's descriptor
//!   registry owns that knowledge).
//!
//! Invariants:
//! - `CreateOrUpdateConnectionRequest`'s `Debug` never prints attribute
//!   values, only attribute names; bodies carry write-only secrets.
//! - A details response is only decoded into [`ConnectionDetails`] when the
//!   status envelope reports success.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::common::ApiStatus;
use crate::serde_helpers::{opt_i64_from_string_or_number, opt_string_from_any};

/// Key under which Saviynt nests the HTTP timeout settings.
pub const TIMEOUT_CONFIG_KEY: &str = "ConnectionTimeoutConfig";

/// HTTP timeout/retry settings nested in HTTP-based connection types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTimeoutConfig {
    #[serde(
        rename = "retryWait",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub retry_wait: Option<i64>,
    #[serde(
        rename = "maxRetries",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub max_retries: Option<i64>,
    #[serde(
        rename = "retryWaitMaxValue",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub retry_wait_max_value: Option<i64>,
    #[serde(
        rename = "retryCount",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub retry_count: Option<i64>,
    #[serde(
        rename = "readTimeout",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub read_timeout: Option<i64>,
    #[serde(
        rename = "connectionTimeout",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub connection_timeout: Option<i64>,
    #[serde(
        rename = "retryFailureStatusCode",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub retry_failure_status_code: Option<i64>,
}

/// Body of `POST /getConnectionDetails`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetConnectionDetailsRequest {
    #[serde(rename = "connectionname", skip_serializing_if = "Option::is_none")]
    pub connection_name: Option<String>,
    #[serde(rename = "connectionkey", skip_serializing_if = "Option::is_none")]
    pub connection_key: Option<String>,
}

impl GetConnectionDetailsRequest {
    /// Look a connection up by name.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            connection_name: Some(name.into()),
            connection_key: None,
        }
    }

    /// Look a connection up by numeric key.
    pub fn by_key(key: i64) -> Self {
        Self {
            connection_name: None,
            connection_key: Some(key.to_string()),
        }
    }
}

/// Body of `POST /createOrUpdateConnection`.
///
/// The common fields are typed; the connection-type specific attributes are
/// flattened in under their wire names.
#[derive(Clone, Serialize)]
pub struct CreateOrUpdateConnectionRequest {
    #[serde(rename = "connectiontype")]
    pub connection_type: String,
    #[serde(rename = "connectionName")]
    pub connection_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaultsavroles: Option<String>,
    #[serde(rename = "emailTemplate", skip_serializing_if = "Option::is_none")]
    pub email_template: Option<String>,
    #[serde(rename = "vaultConnection", skip_serializing_if = "Option::is_none")]
    pub vault_connection: Option<String>,
    #[serde(rename = "vaultConfiguration", skip_serializing_if = "Option::is_none")]
    pub vault_configuration: Option<String>,
    #[serde(rename = "saveInVault", skip_serializing_if = "Option::is_none")]
    pub save_in_vault: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl CreateOrUpdateConnectionRequest {
    /// Start a request for the given connection type and name.
    pub fn new(connection_type: impl Into<String>, connection_name: impl Into<String>) -> Self {
        Self {
            connection_type: connection_type.into(),
            connection_name: connection_name.into(),
            description: None,
            defaultsavroles: None,
            email_template: None,
            vault_connection: None,
            vault_configuration: None,
            save_in_vault: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Names of every field present in the body, for logging.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names = vec!["connectiontype", "connectionName"];
        let optional = [
            ("description", self.description.is_some()),
            ("defaultsavroles", self.defaultsavroles.is_some()),
            ("emailTemplate", self.email_template.is_some()),
            ("vaultConnection", self.vault_connection.is_some()),
            ("vaultConfiguration", self.vault_configuration.is_some()),
            ("saveInVault", self.save_in_vault.is_some()),
        ];
        names.extend(optional.iter().filter(|(_, set)| *set).map(|(n, _)| *n));
        names.extend(self.attributes.keys().map(String::as_str));
        names
    }
}

impl fmt::Debug for CreateOrUpdateConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateOrUpdateConnectionRequest")
            .field("connection_type", &self.connection_type)
            .field("connection_name", &self.connection_name)
            .field("fields", &self.field_names())
            .finish()
    }
}

/// Response of `POST /createOrUpdateConnection`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrUpdateConnectionResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(
        rename = "connectionKey",
        alias = "connectionkey",
        default,
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub connection_key: Option<i64>,
}

/// Metadata every connection-details payload carries.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConnectionBase {
    #[serde(
        rename = "connectionkey",
        alias = "connectionKey",
        default,
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub connection_key: Option<i64>,
    #[serde(rename = "connectionname", alias = "connectionName", default)]
    pub connection_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub defaultsavroles: Option<String>,
    #[serde(rename = "emailtemplate", alias = "emailTemplate", default)]
    pub email_template: Option<String>,
    #[serde(rename = "vaultconnection", alias = "vaultConnection", default)]
    pub vault_connection: Option<String>,
    #[serde(rename = "vaultconfiguration", alias = "vaultConfiguration", default)]
    pub vault_configuration: Option<String>,
    #[serde(
        rename = "saveinvault",
        alias = "saveInVault",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub save_in_vault: Option<String>,
    #[serde(rename = "createdby", alias = "createdBy", default)]
    pub created_by: Option<String>,
    #[serde(rename = "createdon", alias = "createdOn", default)]
    pub created_on: Option<String>,
    #[serde(rename = "updatedby", alias = "updatedBy", default)]
    pub updated_by: Option<String>,
    #[serde(rename = "updatedon", alias = "updatedOn", default)]
    pub updated_on: Option<String>,
    #[serde(default, deserialize_with = "opt_string_from_any")]
    pub status: Option<String>,
}

/// Payload shared by every connection type: base metadata plus the
/// type-specific `connectionattributes` object.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConnectionPayload {
    #[serde(flatten)]
    pub base: ConnectionBase,
    #[serde(rename = "connectionattributes", alias = "connectionAttributes", default)]
    pub attributes: Map<String, Value>,
}

impl ConnectionPayload {
    /// Raw attribute value by wire name, treating JSON `null` as absent.
    pub fn attribute(&self, wire_name: &str) -> Option<&Value> {
        self.attributes.get(wire_name).filter(|v| !v.is_null())
    }

    /// Parsed timeout settings, if the payload carries them.
    pub fn timeout_config(&self) -> Option<ConnectionTimeoutConfig> {
        self.attribute(TIMEOUT_CONFIG_KEY)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Connection-details response, one variant per connection type.
///
/// Exactly one variant is produced per response; the server's
/// `connectiontype` field selects it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "connectiontype")]
pub enum ConnectionDetails {
    #[serde(rename = "AD")]
    Ad(ConnectionPayload),
    #[serde(rename = "ADSI")]
    Adsi(ConnectionPayload),
    #[serde(rename = "DB")]
    Db(ConnectionPayload),
    #[serde(rename = "AzureAD", alias = "EntraID")]
    EntraId(ConnectionPayload),
    #[serde(rename = "GithubRest", alias = "GitHubREST", alias = "GITHUB_REST")]
    GithubRest(ConnectionPayload),
    #[serde(rename = "Okta", alias = "OKTA")]
    Okta(ConnectionPayload),
    #[serde(rename = "REST", alias = "Rest")]
    Rest(ConnectionPayload),
    #[serde(rename = "SalesForce", alias = "Salesforce", alias = "SALESFORCE")]
    Salesforce(ConnectionPayload),
    #[serde(rename = "SAP")]
    Sap(ConnectionPayload),
    #[serde(rename = "Unix", alias = "UNIX")]
    Unix(ConnectionPayload),
    #[serde(rename = "Workday", alias = "WORKDAY")]
    Workday(ConnectionPayload),
    /// A connection type this client does not model.
    #[serde(other)]
    Unsupported,
}

impl ConnectionDetails {
    /// Wire name of the variant's connection type.
    pub fn connection_type(&self) -> &'static str {
        match self {
            Self::Ad(_) => "AD",
            Self::Adsi(_) => "ADSI",
            Self::Db(_) => "DB",
            Self::EntraId(_) => "AzureAD",
            Self::GithubRest(_) => "GithubRest",
            Self::Okta(_) => "Okta",
            Self::Rest(_) => "REST",
            Self::Salesforce(_) => "SalesForce",
            Self::Sap(_) => "SAP",
            Self::Unix(_) => "Unix",
            Self::Workday(_) => "Workday",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Decoded `getConnectionDetails` response.
#[derive(Debug, Clone)]
pub struct ConnectionDetailsResponse {
    pub status: ApiStatus,
    /// Present only when `status` reports success.
    pub details: Option<ConnectionDetails>,
}

impl ConnectionDetailsResponse {
    /// Decode a raw JSON body.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let status: ApiStatus = serde_json::from_value(value.clone())?;
        let details = if status.is_success() {
            Some(serde_json::from_value(value)?)
        } else {
            None
        };
        Ok(Self { status, details })
    }
}

/// Filters for `GET /getConnections`.
#[derive(Debug, Clone, Default)]
pub struct ListConnectionsParams {
    pub connection_name: Option<String>,
    pub connection_type: Option<String>,
    pub max: Option<u32>,
    pub offset: Option<u32>,
}

impl ListConnectionsParams {
    /// Query-string pairs for the set filters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(name) = &self.connection_name {
            query.push(("connectionname", name.clone()));
        }
        if let Some(kind) = &self.connection_type {
            query.push(("connectiontype", kind.clone()));
        }
        if let Some(max) = self.max {
            query.push(("max", max.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        query
    }
}

/// One entry of the connection listing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConnectionListItem {
    #[serde(rename = "CONNECTIONNAME", alias = "connectionname", default)]
    pub connection_name: Option<String>,
    #[serde(rename = "CONNECTIONTYPE", alias = "connectiontype", default)]
    pub connection_type: Option<String>,
    #[serde(
        rename = "CONNECTIONKEY",
        alias = "connectionkey",
        default,
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub connection_key: Option<i64>,
    #[serde(rename = "CONNECTIONDESCRIPTION", alias = "description", default)]
    pub description: Option<String>,
    #[serde(
        rename = "STATUS",
        alias = "status",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub status: Option<String>,
    #[serde(rename = "DEFAULTSAVROLES", alias = "defaultsavroles", default)]
    pub defaultsavroles: Option<String>,
    #[serde(rename = "EMAILTEMPLATE", alias = "emailtemplate", default)]
    pub email_template: Option<String>,
    #[serde(rename = "CREATEDBY", alias = "createdby", default)]
    pub created_by: Option<String>,
    #[serde(rename = "CREATEDON", alias = "createdon", default)]
    pub created_on: Option<String>,
    #[serde(rename = "UPDATEDBY", alias = "updatedby", default)]
    pub updated_by: Option<String>,
    #[serde(rename = "UPDATEDON", alias = "updatedon", default)]
    pub updated_on: Option<String>,
}

/// Response of `GET /getConnections`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionListResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(rename = "connectionList", alias = "connectionlist", default)]
    pub connection_list: Vec<ConnectionListItem>,
    #[serde(
        rename = "displayCount",
        alias = "displaycount",
        default,
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub display_count: Option<i64>,
    #[serde(
        rename = "totalCount",
        alias = "totalcount",
        default,
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub total_count: Option<i64>,
}
