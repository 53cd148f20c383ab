//! Data models for Saviynt API requests and responses.
//!
//! This module re-exports models from resource-specific submodules.
//!
//! # Submodules
//! - [`auth`]: Login response
//! - [`common`]: Status envelope shared by all endpoints
//! - [`connections`]: Connection requests, the tagged connection-details
//!   response, and connection listing
//! - [`security_systems`]: Security-system create/update/list models

pub mod auth;
pub mod common;
pub mod connections;
pub mod security_systems;

pub use auth::LoginResponse;
pub use common::ApiStatus;
pub use connections::{
    ConnectionBase, ConnectionDetails, ConnectionDetailsResponse, ConnectionListItem,
    ConnectionListResponse, ConnectionPayload, ConnectionTimeoutConfig,
    CreateOrUpdateConnectionRequest, CreateOrUpdateConnectionResponse, GetConnectionDetailsRequest,
    ListConnectionsParams, TIMEOUT_CONFIG_KEY,
};
pub use security_systems::{
    CreateSecuritySystemRequest, ListSecuritySystemsParams, SecuritySystemDetails,
    SecuritySystemListResponse, SecuritySystemResponse, UpdateSecuritySystemRequest,
};
