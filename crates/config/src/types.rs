//! Provider configuration types.
//!
//! Responsibilities:
//! - Define the resolved provider configuration handed to the client and engine.
//!
//! Does NOT handle:
//! - Loading from env/.env (see loader.rs and env.rs).
//! - Network connections (see the client crate).
//!
//! Invariants:
//! - The password is held as `secrecy::SecretString` and never appears in `Debug`.
//! - `server_url` is normalized: scheme present, no trailing slash.

use secrecy::SecretString;
use std::time::Duration;

/// Resolved configuration of the Saviynt provider block.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the Saviynt tenant (e.g. `https://tenant.saviyntcloud.com`).
    pub server_url: String,
    /// API username.
    pub username: String,
    /// API password.
    pub password: SecretString,
    /// Saviynt server version, when known. Used for version-gated attributes.
    pub saviynt_version: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether to skip TLS verification (self-signed development tenants).
    pub skip_verify: bool,
}
