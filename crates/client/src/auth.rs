//! Bearer-token sessions.
//!
//! A [`Session`] is what a successful login yields: the access token and
//! when it was issued. The provider's retry harness owns the shared session
//! and replaces it on refresh; this type only describes one token.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::{Duration, Instant};

use saviynt_config::constants::DEFAULT_TOKEN_TTL_SECS;

use crate::models::LoginResponse;

/// One bearer token with its expiry information.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    issued_at: Instant,
    ttl: Duration,
}

impl Session {
    /// Build a session from a raw token and a TTL in seconds.
    pub fn new(token: SecretString, ttl_seconds: Option<u64>) -> Self {
        Self {
            token,
            issued_at: Instant::now(),
            ttl: Duration::from_secs(ttl_seconds.unwrap_or(DEFAULT_TOKEN_TTL_SECS)),
        }
    }

    /// Expose the bearer token for an outbound request.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// True once the TTL has elapsed.
    pub fn is_expired(&self) -> bool {
        self.issued_at.elapsed() >= self.ttl
    }

    /// Time left before the TTL elapses.
    pub fn remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.issued_at.elapsed())
    }
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        let ttl = resp
            .expires_in
            .and_then(|secs| u64::try_from(secs).ok())
            .filter(|secs| *secs > 0);
        Session::new(resp.access_token, ttl)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("remaining", &self.remaining())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_login_uses_expires_in() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"access_token":"tok-1","token_type":"Bearer","expires_in":"120"}"#,
        )
        .unwrap();
        let session = Session::from(resp);
        assert_eq!(session.token(), "tok-1");
        assert!(!session.is_expired());
        assert!(session.remaining() <= Duration::from_secs(120));
    }

    #[test]
    fn test_zero_ttl_falls_back_to_default() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token":"tok-1","expires_in":0}"#).unwrap();
        let session = Session::from(resp);
        assert!(session.remaining() > Duration::from_secs(DEFAULT_TOKEN_TTL_SECS - 5));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new(SecretString::new("very-secret".to_string().into()), None);
        let debug = format!("{:?}", session);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
