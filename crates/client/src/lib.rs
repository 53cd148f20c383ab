//! Saviynt REST API client.
//!
//! This crate provides a typed transport for the Saviynt Security Manager
//! REST API: login, the v5 connection endpoints and the v5 security-system
//! endpoints. Authenticated calls take the bearer token explicitly so the
//! caller owns token refresh.

mod auth;
pub mod client;
pub mod error;
pub mod metrics;
pub mod models;
mod serde_helpers;
pub mod tracing;

pub mod endpoints;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::Session;
pub use client::SaviyntClient;
pub use client::builder::SaviyntClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    ApiStatus, ConnectionBase, ConnectionDetails, ConnectionDetailsResponse, ConnectionListItem,
    ConnectionListResponse, ConnectionPayload, ConnectionTimeoutConfig,
    CreateOrUpdateConnectionRequest, CreateOrUpdateConnectionResponse,
    CreateSecuritySystemRequest, GetConnectionDetailsRequest, ListConnectionsParams,
    ListSecuritySystemsParams, LoginResponse, SecuritySystemDetails, SecuritySystemListResponse,
    SecuritySystemResponse, TIMEOUT_CONFIG_KEY, UpdateSecuritySystemRequest,
};
