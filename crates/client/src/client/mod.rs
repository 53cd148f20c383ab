//! Main Saviynt REST API client and API methods.
//!
//! This module provides [`SaviyntClient`], a thin typed facade over the
//! endpoint functions in [`crate::endpoints`].
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Token storage and refresh. Every authenticated method takes the bearer
//!   token explicitly; the provider's retry harness decides which token to
//!   pass and when to refresh it.
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//!
//! # Invariants
//! - The client never retries. An HTTP 401 surfaces as
//!   [`crate::ClientError::Unauthorized`] for the caller to act on.
//! - Cloning is cheap and shares the underlying connection pool.

pub mod builder;

use secrecy::SecretString;

use crate::auth::Session;
use crate::endpoints;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{
    ConnectionDetailsResponse, ConnectionListResponse, CreateOrUpdateConnectionRequest,
    CreateOrUpdateConnectionResponse, CreateSecuritySystemRequest, GetConnectionDetailsRequest,
    ListConnectionsParams, ListSecuritySystemsParams, SecuritySystemListResponse,
    SecuritySystemResponse, UpdateSecuritySystemRequest,
};

/// Saviynt REST API client.
#[derive(Debug, Clone)]
pub struct SaviyntClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl SaviyntClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SaviyntClientBuilder {
        builder::SaviyntClientBuilder::new()
    }

    /// Normalized base URL of the tenant.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Username the client logs in as.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Metrics collector, if one was configured.
    pub fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }

    /// Log in with the configured credentials and return a fresh session.
    pub async fn login(&self) -> Result<Session> {
        let resp = endpoints::login(
            &self.http,
            &self.base_url,
            &self.username,
            &self.password,
            self.metrics.as_ref(),
        )
        .await?;
        Ok(Session::from(resp))
    }

    /// Create or update a connection.
    pub async fn create_or_update_connection(
        &self,
        token: &str,
        body: &CreateOrUpdateConnectionRequest,
    ) -> Result<CreateOrUpdateConnectionResponse> {
        endpoints::create_or_update_connection(
            &self.http,
            &self.base_url,
            token,
            body,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Fetch one connection's details.
    pub async fn get_connection_details(
        &self,
        token: &str,
        request: &GetConnectionDetailsRequest,
    ) -> Result<ConnectionDetailsResponse> {
        endpoints::get_connection_details(
            &self.http,
            &self.base_url,
            token,
            request,
            self.metrics.as_ref(),
        )
        .await
    }

    /// List connections.
    pub async fn list_connections(
        &self,
        token: &str,
        params: &ListConnectionsParams,
    ) -> Result<ConnectionListResponse> {
        endpoints::list_connections(
            &self.http,
            &self.base_url,
            token,
            params,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Create a security system.
    pub async fn create_security_system(
        &self,
        token: &str,
        body: &CreateSecuritySystemRequest,
    ) -> Result<SecuritySystemResponse> {
        endpoints::create_security_system(
            &self.http,
            &self.base_url,
            token,
            body,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Update a security system.
    pub async fn update_security_system(
        &self,
        token: &str,
        body: &UpdateSecuritySystemRequest,
    ) -> Result<SecuritySystemResponse> {
        endpoints::update_security_system(
            &self.http,
            &self.base_url,
            token,
            body,
            self.metrics.as_ref(),
        )
        .await
    }

    /// List security systems.
    pub async fn list_security_systems(
        &self,
        token: &str,
        params: &ListSecuritySystemsParams,
    ) -> Result<SecuritySystemListResponse> {
        endpoints::list_security_systems(
            &self.http,
            &self.base_url,
            token,
            params,
            self.metrics.as_ref(),
        )
        .await
    }
}
