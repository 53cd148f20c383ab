//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Saviynt client.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#[allow(unused_imports)]
pub use saviynt_client::testing::load_fixture;

#[allow(unused_imports)]
pub use saviynt_client::{ClientError, SaviyntClient};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;

/// Build a client pointed at the mock server.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> SaviyntClient {
    SaviyntClient::builder()
        .base_url(server.uri())
        .username("admin".to_string())
        .password(SecretString::new("fixture-password".to_string().into()))
        .build()
        .expect("client should build")
}
