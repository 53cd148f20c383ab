//! Centralized constants for the Saviynt provider workspace.
//!
//! Default values and environment variable names used across crates live
//! here so the client, config and provider crates agree on them.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Token lifetime assumed when the login response omits `expires_in`.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

// =============================================================================
// Listing Defaults
// =============================================================================

/// Upper bound the listing endpoints accept for `max`.
pub const MAX_LIST_PAGE_SIZE: u32 = 500;

// =============================================================================
// Environment Variables
// =============================================================================

/// Saviynt server URL.
pub const ENV_URL: &str = "SAVIYNT_URL";

/// Saviynt API username.
pub const ENV_USERNAME: &str = "SAVIYNT_USERNAME";

/// Saviynt API password.
pub const ENV_PASSWORD: &str = "SAVIYNT_PASSWORD";

/// Saviynt server version (e.g. `25.1`), used for version-gated attributes.
pub const ENV_VERSION: &str = "SAVIYNT_VERSION";

/// Request timeout override in seconds.
pub const ENV_TIMEOUT: &str = "SAVIYNT_TIMEOUT";

/// Skip TLS verification (`true`/`false`).
pub const ENV_SKIP_VERIFY: &str = "SAVIYNT_SKIP_VERIFY";

/// Acceptance-test marker; alters delete behaviour when set to `1`.
pub const ENV_ACCEPTANCE_TEST: &str = "TF_ACC";

/// Disables `.env` loading when set to `1` or `true`.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
