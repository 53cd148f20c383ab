//! Connector descriptor registry.
//!
//! Responsibilities:
//! - One static [`Descriptor`] per [`ConnectorKind`]: transport type name,
//!   identifier prefix, error-code prefix, attribute specs and the selector
//!   that picks the kind's payload off a connection-details response.
//! - Lookup by kind and by type name.
//!
//! Does NOT handle:
//! - Create/Read/Update behavior (see `engine.rs`, which is kind-agnostic).
//! - The common connection fields (name, description, vault trio); those are
//!   typed on `ConnectorModel`.
//!
//! Invariants:
//! - Logical names and transport names are unique within a descriptor.
//! - Secret attributes are never computed; the server never echoes them.
//! - Every kind's selector accepts exactly its own response variant.

mod ad;
mod adsi;
mod db;
mod entraid;
mod github_rest;
mod okta;
mod rest;
mod salesforce;
mod sap;
mod unix;
mod workday;

use std::fmt;
use std::str::FromStr;

use saviynt_client::{ConnectionDetails, ConnectionPayload, TIMEOUT_CONFIG_KEY};

use crate::sanitize::Sanitizer;
use crate::value::NullPolicy;

/// Closed set of connector kinds the provider manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectorKind {
    Ad,
    Adsi,
    Db,
    EntraId,
    GithubRest,
    Okta,
    Rest,
    Salesforce,
    Sap,
    Unix,
    Workday,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 11] = [
        ConnectorKind::Ad,
        ConnectorKind::Adsi,
        ConnectorKind::Db,
        ConnectorKind::EntraId,
        ConnectorKind::GithubRest,
        ConnectorKind::Okta,
        ConnectorKind::Rest,
        ConnectorKind::Salesforce,
        ConnectorKind::Sap,
        ConnectorKind::Unix,
        ConnectorKind::Workday,
    ];

    pub fn descriptor(self) -> &'static Descriptor {
        descriptor(self)
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().display_name)
    }
}

/// Error returned when a string names no known connector kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown connector kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ConnectorKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        by_type_name(s)
            .map(|d| d.kind)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Value shape of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    String,
    Int64,
    Bool,
    /// The nested HTTP timeout/retry record.
    TimeoutConfig,
}

/// Declaration of one kind-specific attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Name on the host surface (snake_case).
    pub logical_name: &'static str,
    /// Name in `connectionattributes` and in create/update bodies.
    pub transport_name: &'static str,
    pub semantic_type: SemanticType,
    /// Required on Create.
    pub required: bool,
    /// Write-only: accepted from config, never read back, never logged.
    pub secret: bool,
    /// Server-authoritative; state is overwritten from Read.
    pub computed: bool,
    /// How an explicit null in the plan is sent.
    pub null_policy: NullPolicy,
    pub description: &'static str,
}

impl AttributeSpec {
    pub const fn string(
        logical_name: &'static str,
        transport_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            logical_name,
            transport_name,
            semantic_type: SemanticType::String,
            required: false,
            secret: false,
            computed: false,
            null_policy: NullPolicy::Omit,
            description,
        }
    }

    pub const fn int64(
        logical_name: &'static str,
        transport_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            semantic_type: SemanticType::Int64,
            ..Self::string(logical_name, transport_name, description)
        }
    }

    pub const fn bool(
        logical_name: &'static str,
        transport_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            semantic_type: SemanticType::Bool,
            ..Self::string(logical_name, transport_name, description)
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Mark write-only. Secrets are never computed.
    pub const fn secret(self) -> Self {
        Self {
            secret: true,
            computed: false,
            ..self
        }
    }

    pub const fn computed(self) -> Self {
        Self {
            computed: true,
            ..self
        }
    }

    /// Send an explicit null as an empty string so the server clears it.
    pub const fn clear_on_null(self) -> Self {
        Self {
            null_policy: NullPolicy::EmptyString,
            ..self
        }
    }
}

/// The nested timeout record carried by HTTP-based kinds.
pub const TIMEOUT_CONFIG: AttributeSpec = AttributeSpec {
    logical_name: "connection_timeout_config",
    transport_name: TIMEOUT_CONFIG_KEY,
    semantic_type: SemanticType::TimeoutConfig,
    required: false,
    secret: false,
    computed: false,
    null_policy: NullPolicy::Omit,
    description: "HTTP timeout and retry settings for the connection.",
};

/// Picks a kind's payload off a connection-details response.
pub type ResponseSelector = fn(&ConnectionDetails) -> Option<&ConnectionPayload>;

/// Everything the engine needs to know about one connector kind.
pub struct Descriptor {
    pub kind: ConnectorKind,
    /// Human label used in titles and logs ("REST", "Salesforce").
    pub display_name: &'static str,
    /// Lowercase name used in host type names ("rest", "salesforce").
    pub type_name: &'static str,
    /// Literal `connectiontype` value sent on create/update.
    pub transport_type_name: &'static str,
    /// Prefix of the surface id (`<id_prefix>-<connectionKey>`).
    pub id_prefix: &'static str,
    /// Prefix of generated error codes.
    pub code_prefix: &'static str,
    pub attributes: &'static [AttributeSpec],
    pub response_selector: ResponseSelector,
}

impl Descriptor {
    /// Stable host-visible identifier for a connection key.
    pub fn surface_id(&self, connection_key: i64) -> String {
        format!("{}-{}", self.id_prefix, connection_key)
    }

    pub fn resource_type_name(&self) -> String {
        format!("saviynt_{}_connection_resource", self.type_name)
    }

    pub fn data_source_type_name(&self) -> String {
        format!("saviynt_{}_connection_datasource", self.type_name)
    }

    pub fn attribute(&self, logical_name: &str) -> Option<&'static AttributeSpec> {
        self.attributes
            .iter()
            .find(|a| a.logical_name == logical_name)
    }

    pub fn secret_attributes(&self) -> impl Iterator<Item = &'static AttributeSpec> + use<> {
        self.attributes.iter().filter(|a| a.secret)
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &'static AttributeSpec> + use<> {
        self.attributes.iter().filter(|a| a.required)
    }

    pub fn has_timeout_config(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| a.semantic_type == SemanticType::TimeoutConfig)
    }

    /// The kind's payload, or `None` when the response is another kind.
    pub fn select<'a>(&self, details: &'a ConnectionDetails) -> Option<&'a ConnectionPayload> {
        (self.response_selector)(details)
    }

    /// Sanitizer that knows this kind's secret attribute names.
    pub fn sanitizer(&self) -> Sanitizer {
        Sanitizer::new().with_names(
            self.secret_attributes()
                .flat_map(|a| [a.logical_name, a.transport_name]),
        )
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("kind", &self.kind)
            .field("transport_type_name", &self.transport_type_name)
            .field("id_prefix", &self.id_prefix)
            .field("attributes", &self.attributes.len())
            .finish()
    }
}

/// Descriptor for a kind.
pub fn descriptor(kind: ConnectorKind) -> &'static Descriptor {
    match kind {
        ConnectorKind::Ad => &ad::DESCRIPTOR,
        ConnectorKind::Adsi => &adsi::DESCRIPTOR,
        ConnectorKind::Db => &db::DESCRIPTOR,
        ConnectorKind::EntraId => &entraid::DESCRIPTOR,
        ConnectorKind::GithubRest => &github_rest::DESCRIPTOR,
        ConnectorKind::Okta => &okta::DESCRIPTOR,
        ConnectorKind::Rest => &rest::DESCRIPTOR,
        ConnectorKind::Salesforce => &salesforce::DESCRIPTOR,
        ConnectorKind::Sap => &sap::DESCRIPTOR,
        ConnectorKind::Unix => &unix::DESCRIPTOR,
        ConnectorKind::Workday => &workday::DESCRIPTOR,
    }
}

/// Every registered descriptor, in [`ConnectorKind::ALL`] order.
pub fn all() -> impl Iterator<Item = &'static Descriptor> {
    ConnectorKind::ALL.into_iter().map(descriptor)
}

/// Resolve a host type name or a Saviynt `connectiontype`, case-insensitively.
pub fn by_type_name(name: &str) -> Option<&'static Descriptor> {
    let name = name.trim();
    all().find(|d| {
        d.type_name.eq_ignore_ascii_case(name)
            || d.transport_type_name.eq_ignore_ascii_case(name)
            || d.display_name.eq_ignore_ascii_case(name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_matching_descriptor() {
        for kind in ConnectorKind::ALL {
            assert_eq!(descriptor(kind).kind, kind);
        }
    }

    #[test]
    fn test_names_are_unique_within_descriptor() {
        for d in all() {
            let logical: HashSet<_> = d.attributes.iter().map(|a| a.logical_name).collect();
            let wire: HashSet<_> = d.attributes.iter().map(|a| a.transport_name).collect();
            assert_eq!(logical.len(), d.attributes.len(), "{}", d.display_name);
            assert_eq!(wire.len(), d.attributes.len(), "{}", d.display_name);
        }
    }

    #[test]
    fn test_id_prefixes_are_unique() {
        let prefixes: HashSet<_> = all().map(|d| d.id_prefix).collect();
        assert_eq!(prefixes.len(), ConnectorKind::ALL.len());
    }

    #[test]
    fn test_secrets_are_never_computed() {
        for d in all() {
            for a in d.secret_attributes() {
                assert!(!a.computed, "{}.{}", d.display_name, a.logical_name);
            }
        }
    }

    #[test]
    fn test_http_kinds_carry_timeout_config() {
        let http = [
            ConnectorKind::Rest,
            ConnectorKind::GithubRest,
            ConnectorKind::Okta,
            ConnectorKind::EntraId,
            ConnectorKind::Workday,
            ConnectorKind::Salesforce,
        ];
        for kind in ConnectorKind::ALL {
            assert_eq!(
                descriptor(kind).has_timeout_config(),
                http.contains(&kind),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_selector_accepts_only_own_variant() {
        let payload = ConnectionPayload::default();
        let variants = [
            ConnectionDetails::Ad(payload.clone()),
            ConnectionDetails::Adsi(payload.clone()),
            ConnectionDetails::Db(payload.clone()),
            ConnectionDetails::EntraId(payload.clone()),
            ConnectionDetails::GithubRest(payload.clone()),
            ConnectionDetails::Okta(payload.clone()),
            ConnectionDetails::Rest(payload.clone()),
            ConnectionDetails::Salesforce(payload.clone()),
            ConnectionDetails::Sap(payload.clone()),
            ConnectionDetails::Unix(payload.clone()),
            ConnectionDetails::Workday(payload.clone()),
        ];
        for (i, kind) in ConnectorKind::ALL.into_iter().enumerate() {
            let d = descriptor(kind);
            for (j, variant) in variants.iter().enumerate() {
                assert_eq!(d.select(variant).is_some(), i == j, "{kind} vs {j}");
            }
            assert!(d.select(&ConnectionDetails::Unsupported).is_none());
        }
    }

    #[test]
    fn test_selector_matches_transport_type_name() {
        for d in all() {
            let json = serde_json::json!({ "connectiontype": d.transport_type_name });
            let details: ConnectionDetails = serde_json::from_value(json).unwrap();
            assert!(d.select(&details).is_some(), "{}", d.transport_type_name);
        }
    }

    #[test]
    fn test_lookup_by_type_name() {
        assert_eq!(by_type_name("rest").unwrap().kind, ConnectorKind::Rest);
        assert_eq!(by_type_name("SalesForce").unwrap().kind, ConnectorKind::Salesforce);
        assert_eq!(by_type_name("AzureAD").unwrap().kind, ConnectorKind::EntraId);
        assert_eq!("entraid".parse::<ConnectorKind>().unwrap(), ConnectorKind::EntraId);
        assert!("mainframe".parse::<ConnectorKind>().is_err());
    }

    #[test]
    fn test_surface_id_and_type_names() {
        let d = descriptor(ConnectorKind::Ad);
        assert_eq!(d.surface_id(42), "ds-ad-42");
        assert_eq!(d.resource_type_name(), "saviynt_ad_connection_resource");
        assert_eq!(d.data_source_type_name(), "saviynt_ad_connection_datasource");
    }

    #[test]
    fn test_sanitizer_redacts_secret_wire_names() {
        let d = descriptor(ConnectorKind::Ad);
        let out = d.sanitizer().sanitize("bind failed PASSWORD=hunter2 for user");
        assert!(!out.contains("hunter2"));
    }
}
