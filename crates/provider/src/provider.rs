//! Provider facade: the entry points a declarative-configuration host calls.
//!
//! Responsibilities:
//! - Configure: resolve the provider block, log in once, build the shared
//!   [`Credentials`] and client.
//! - Hand out resources and data sources bound to the shared API handle.
//! - Report metadata and schemas.
//! - Convert every operation result into a [`HostResponse`].
//!
//! Does NOT handle:
//! - Any per-kind behavior; resources are generic over descriptors.
//!
//! Invariants:
//! - One login per Configure; later logins only happen through the retry
//!   harness's refresh path.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use saviynt_client::tracing::{TracingConfig, TracingError, TracingGuard};
use saviynt_client::{MetricsCollector, SaviyntClient, SaviyntClientBuilder, Session};
use saviynt_config::{ConfigLoader, ProviderConfig};
use tracing::info;

use crate::api::ApiHandle;
use crate::cancellation::CancellationToken;
use crate::context::{Operation, OperationContext, Scope};
use crate::data_source::{ConnectionDataSource, ConnectionDataState, ConnectionQuery};
use crate::descriptor::{ConnectorKind, all};
use crate::diagnostics::HostResponse;
use crate::engine::ConnectorResource;
use crate::errors::{ErrorCategory, Result};
use crate::listing::{
    ConnectionSummary, ConnectionsDataSource, ConnectionsQuery, ListingState,
    SecuritySystemSummary, SecuritySystemsDataSource, SecuritySystemsQuery,
};
use crate::model::{ConnectorConfig, ConnectorModel};
use crate::retry::{Credentials, LoginRefresher, TokenRefresher};
use crate::schema::{self, Schema};
use crate::security_system::{SecuritySystemModel, SecuritySystemResource};

/// Provider type name reported to the host.
pub const PROVIDER_TYPE_NAME: &str = "saviynt";

/// Metadata reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub type_name: &'static str,
    pub version: &'static str,
}

/// Raw provider block as the host delivers it. Unset fields fall back to
/// the environment and then to `.env`.
#[derive(Debug, Clone, Default)]
pub struct ProviderBlock {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub saviynt_version: Option<String>,
    pub timeout_secs: Option<u64>,
    pub skip_verify: Option<bool>,
}

impl ProviderBlock {
    /// Resolve against the environment.
    pub fn resolve(self) -> Result<ProviderConfig> {
        let ctx = OperationContext::begin(Scope::provider(), Operation::Configure, "");
        let mut loader = ConfigLoader::new();
        if let Some(url) = self.server_url {
            loader = loader.with_server_url(url);
        }
        if let Some(username) = self.username {
            loader = loader.with_username(username);
        }
        if let Some(password) = self.password {
            loader = loader.with_password(password);
        }
        if let Some(version) = self.saviynt_version {
            loader = loader.with_saviynt_version(version);
        }
        if let Some(secs) = self.timeout_secs {
            loader = loader.with_timeout(Duration::from_secs(secs));
        }
        if let Some(skip) = self.skip_verify {
            loader = loader.with_skip_verify(skip);
        }
        let config = loader
            .load_dotenv()
            .and_then(ConfigLoader::from_env)
            .and_then(ConfigLoader::build)
            .map_err(|e| ctx.error(ErrorCategory::ProviderConfig, e.to_string()))?;
        ctx.finish();
        Ok(config)
    }
}

/// A configured provider instance.
#[derive(Debug, Clone)]
pub struct Provider {
    api: ApiHandle,
}

impl Provider {
    pub fn metadata() -> Metadata {
        Metadata {
            type_name: PROVIDER_TYPE_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn provider_schema() -> Schema {
        schema::provider_schema()
    }

    /// Install the process-wide subscriber. Call once at plugin startup and
    /// hold the guard until exit; OTLP export turns on when
    /// `SAVIYNT_OTLP_ENDPOINT` is set.
    pub fn init_tracing(json: bool) -> std::result::Result<TracingGuard, TracingError> {
        TracingConfig::new()
            .with_service_version(env!("CARGO_PKG_VERSION"))
            .with_json(json)
            .init()
    }

    /// Log in and build the shared credentials.
    pub async fn configure(config: ProviderConfig) -> Result<Self> {
        let ctx = OperationContext::begin(Scope::provider(), Operation::Configure, &config.username);
        let client = SaviyntClientBuilder::new()
            .from_config(&config)
            .metrics(MetricsCollector::new())
            .build()
            .map_err(|e| ctx.client_error(ErrorCategory::ProviderConfig, e))?;
        let session = client
            .login()
            .await
            .map_err(|e| ctx.client_error(ErrorCategory::Authentication, e))?;
        let refresher = Arc::new(LoginRefresher::new(client.clone()));
        let provider = Self::from_parts(client, session, refresher, config.saviynt_version);
        info!(server_url = %config.server_url, "provider configured");
        ctx.finish();
        Ok(provider)
    }

    /// Resolve a raw provider block and configure.
    pub async fn configure_block(block: ProviderBlock) -> HostResponse<Self> {
        let config = match block.resolve() {
            Ok(config) => config,
            Err(err) => return err.into(),
        };
        match Self::configure(config).await {
            Ok(provider) => HostResponse {
                state: Some(provider),
                diagnostics: Vec::new(),
            },
            Err(err) => err.into(),
        }
    }

    /// Assemble a provider from an already-established session.
    pub fn from_parts(
        client: SaviyntClient,
        session: Session,
        refresher: Arc<dyn TokenRefresher>,
        saviynt_version: Option<String>,
    ) -> Self {
        let metrics = client.metrics().cloned();
        let credentials = Credentials::new(
            client.base_url(),
            env!("CARGO_PKG_VERSION"),
            session,
            refresher,
        )
        .with_metrics(metrics);
        Self {
            api: ApiHandle::new(client, Arc::new(credentials), saviynt_version),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.api.credentials
    }

    pub fn connector(&self, kind: ConnectorKind) -> ConnectorResource {
        ConnectorResource::new(kind.descriptor(), self.api.clone())
    }

    pub fn security_system(&self) -> SecuritySystemResource {
        SecuritySystemResource::new(self.api.clone())
    }

    pub fn connection_data_source(&self, kind: ConnectorKind) -> ConnectionDataSource {
        ConnectionDataSource::new(kind.descriptor(), self.api.clone())
    }

    pub fn connections_data_source(&self) -> ConnectionsDataSource {
        ConnectionsDataSource::new(self.api.clone())
    }

    pub fn security_systems_data_source(&self) -> SecuritySystemsDataSource {
        SecuritySystemsDataSource::new(self.api.clone())
    }

    /// Resource schemas keyed by host type name.
    pub fn resource_schemas() -> BTreeMap<String, Schema> {
        all()
            .map(schema::connector_resource_schema)
            .chain(std::iter::once(schema::security_system_resource_schema()))
            .map(|s| (s.type_name.clone(), s))
            .collect()
    }

    /// Data-source schemas keyed by host type name.
    pub fn data_source_schemas() -> BTreeMap<String, Schema> {
        all()
            .map(schema::connector_data_source_schema)
            .chain([
                schema::connections_data_source_schema(),
                schema::security_systems_data_source_schema(),
            ])
            .map(|s| (s.type_name.clone(), s))
            .collect()
    }

    pub async fn create_connection(
        &self,
        kind: ConnectorKind,
        plan: ConnectorModel,
        config: &ConnectorConfig,
        cancel: &CancellationToken,
    ) -> HostResponse<ConnectorModel> {
        self.connector(kind).create(plan, config, cancel).await.into()
    }

    pub async fn read_connection(
        &self,
        kind: ConnectorKind,
        state: &ConnectorModel,
        cancel: &CancellationToken,
    ) -> HostResponse<ConnectorModel> {
        self.connector(kind).read(state, cancel).await.into()
    }

    pub async fn update_connection(
        &self,
        kind: ConnectorKind,
        state: &ConnectorModel,
        plan: ConnectorModel,
        config: &ConnectorConfig,
        cancel: &CancellationToken,
    ) -> HostResponse<ConnectorModel> {
        self.connector(kind)
            .update(state, plan, config, cancel)
            .await
            .into()
    }

    pub async fn import_connection(
        &self,
        kind: ConnectorKind,
        connection_name: &str,
        cancel: &CancellationToken,
    ) -> HostResponse<ConnectorModel> {
        self.connector(kind)
            .import(connection_name, cancel)
            .await
            .into()
    }

    pub fn delete_connection(&self, kind: ConnectorKind, state: &ConnectorModel) -> HostResponse<()> {
        self.connector(kind).delete(state).into()
    }

    pub async fn create_security_system(
        &self,
        plan: SecuritySystemModel,
        cancel: &CancellationToken,
    ) -> HostResponse<SecuritySystemModel> {
        let identity = plan.identity();
        match self.security_system().create(plan, cancel).await {
            Err(err) if err.category == ErrorCategory::PartialProvisioning => HostResponse {
                state: Some(identity),
                diagnostics: vec![err.to_diagnostic()],
            },
            result => result.into(),
        }
    }

    pub async fn read_security_system(
        &self,
        state: &SecuritySystemModel,
        cancel: &CancellationToken,
    ) -> HostResponse<SecuritySystemModel> {
        self.security_system().read(state, cancel).await.into()
    }

    pub async fn update_security_system(
        &self,
        state: &SecuritySystemModel,
        plan: SecuritySystemModel,
        cancel: &CancellationToken,
    ) -> HostResponse<SecuritySystemModel> {
        self.security_system()
            .update(state, plan, cancel)
            .await
            .into()
    }

    pub async fn import_security_system(
        &self,
        systemname: &str,
        cancel: &CancellationToken,
    ) -> HostResponse<SecuritySystemModel> {
        self.security_system().import(systemname, cancel).await.into()
    }

    pub fn delete_security_system(&self, state: &SecuritySystemModel) -> HostResponse<()> {
        self.security_system().delete(state).into()
    }

    pub async fn read_connection_data_source(
        &self,
        kind: ConnectorKind,
        query: &ConnectionQuery,
        cancel: &CancellationToken,
    ) -> HostResponse<ConnectionDataState> {
        self.connection_data_source(kind)
            .read(query, cancel)
            .await
            .into()
    }

    pub async fn read_connections(
        &self,
        query: &ConnectionsQuery,
        cancel: &CancellationToken,
    ) -> HostResponse<ListingState<ConnectionSummary>> {
        self.connections_data_source().read(query, cancel).await.into()
    }

    pub async fn read_security_systems(
        &self,
        query: &SecuritySystemsQuery,
        cancel: &CancellationToken,
    ) -> HostResponse<ListingState<SecuritySystemSummary>> {
        self.security_systems_data_source()
            .read(query, cancel)
            .await
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let meta = Provider::metadata();
        assert_eq!(meta.type_name, "saviynt");
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_one_schema_per_kind() {
        let resources = Provider::resource_schemas();
        assert_eq!(resources.len(), ConnectorKind::ALL.len() + 1);
        assert!(resources.contains_key("saviynt_salesforce_connection_resource"));
        assert!(resources.contains_key("saviynt_security_system_resource"));

        let data_sources = Provider::data_source_schemas();
        assert_eq!(data_sources.len(), ConnectorKind::ALL.len() + 2);
        assert!(data_sources.contains_key("saviynt_entraid_connection_datasource"));
        assert!(data_sources.contains_key("saviynt_connections_datasource"));
    }
}
