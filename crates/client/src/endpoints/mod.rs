//! REST API endpoint implementations.
//!
//! Every endpoint is a free function taking the shared `reqwest::Client`,
//! the normalized base URL and, for authenticated calls, the bearer token
//! to use. Token lifecycle is the caller's concern.

mod auth;
mod connections;
mod request;
mod security_systems;

pub use auth::login;
pub use connections::{create_or_update_connection, get_connection_details, list_connections};
pub(crate) use request::{decode_json, send_request};
pub use security_systems::{create_security_system, list_security_systems, update_security_system};

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/ECM/api/login";

/// Prefix shared by every v5 endpoint.
pub const API_V5_PREFIX: &str = "/ECM/api/v5";

pub(crate) fn v5_url(base_url: &str, endpoint: &str) -> String {
    format!("{}{}{}", base_url, API_V5_PREFIX, endpoint)
}
