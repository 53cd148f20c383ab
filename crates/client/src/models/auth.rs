//! Authentication models for the Saviynt login API.

use secrecy::SecretString;
use serde::Deserialize;

/// Response of `POST /ECM/api/login`.
///
/// The access token is held as a [`SecretString`] so it never shows up in
/// `Debug` output.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(deserialize_with = "crate::serde_helpers::secret_string")]
    pub access_token: SecretString,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number")]
    pub expires_in: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_secret_string")]
    pub refresh_token: Option<SecretString>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_deserialize_login_response() {
        let json = r#"{"access_token": "eyJ.token", "token_type": "Bearer", "expires_in": "3600", "refresh_token": "r1"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token.expose_secret(), "eyJ.token");
        assert_eq!(resp.expires_in, Some(3600));
        assert!(!format!("{:?}", resp).contains("eyJ.token"));
    }
}
