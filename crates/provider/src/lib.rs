//! Saviynt provider core.
//!
//! This crate implements the engine behind a declarative-configuration
//! provider for Saviynt Security Manager: tri-state value adapters, a fixed
//! error taxonomy, a 401-refresh retry harness, a table of connector
//! descriptors driving one generic Create/Read/Update/Import engine, the
//! two-phase security-system lifecycle and the read-side data sources.
//!
//! Start at [`Provider`]: configure it with a [`saviynt_config::ProviderConfig`]
//! and call the per-operation entry points, each of which returns a
//! [`HostResponse`].

pub mod api;
pub mod cancellation;
pub mod context;
pub mod data_source;
pub mod descriptor;
pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod listing;
pub mod model;
pub mod provider;
pub mod retry;
pub mod sanitize;
pub mod schema;
pub mod security_system;
pub mod value;

pub use cancellation::CancellationToken;
pub use data_source::{ConnectionDataSource, ConnectionDataState, ConnectionQuery};
pub use descriptor::{AttributeSpec, ConnectorKind, Descriptor, SemanticType};
pub use diagnostics::{Diagnostic, HostResponse, Outcome, Severity};
pub use engine::ConnectorResource;
pub use errors::{ErrorCategory, ProviderError, Result};
pub use listing::{
    ConnectionSummary, ConnectionsDataSource, ConnectionsQuery, ListingState,
    SecuritySystemSummary, SecuritySystemsDataSource, SecuritySystemsQuery,
};
pub use model::{ConnectorConfig, ConnectorModel, TimeoutConfig};
pub use provider::{Metadata, Provider, ProviderBlock};
pub use retry::{AuthRetryError, Credentials, LoginRefresher, TokenRefresher, with_auth_retry};
pub use sanitize::Sanitizer;
pub use schema::{Schema, SchemaAttribute, SchemaType};
pub use security_system::{SecuritySystemModel, SecuritySystemResource};
pub use value::{Attr, AttrValue, NullPolicy};
