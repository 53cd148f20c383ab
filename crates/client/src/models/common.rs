//! Status envelope shared across Saviynt API responses.
//!
//! Every Saviynt v5 response carries an `errorCode` (or `errorcode`) and a
//! `msg`. The code is normalized to `i64` here regardless of whether the
//! server sent a number or a string.

use serde::Deserialize;

use crate::serde_helpers::i64_from_string_or_number;

/// `{errorCode, msg}` part of a Saviynt response.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ApiStatus {
    #[serde(
        rename = "errorCode",
        alias = "errorcode",
        alias = "ErrorCode",
        default,
        deserialize_with = "i64_from_string_or_number"
    )]
    pub error_code: i64,
    #[serde(default, alias = "message")]
    pub msg: String,
}

impl ApiStatus {
    /// True when the server reported success (`errorCode == 0`).
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_numeric_codes_normalize() {
        let a: ApiStatus = serde_json::from_str(r#"{"errorCode": "0", "msg": "success"}"#).unwrap();
        let b: ApiStatus = serde_json::from_str(r#"{"errorcode": 0, "msg": "success"}"#).unwrap();
        assert_eq!(a, b);
        assert!(a.is_success());
    }

    #[test]
    fn test_failure_code() {
        let s: ApiStatus =
            serde_json::from_str(r#"{"errorCode": "1", "msg": "Connection already exists"}"#)
                .unwrap();
        assert!(!s.is_success());
        assert_eq!(s.error_code, 1);
    }

    #[test]
    fn test_missing_code_defaults_to_zero() {
        let s: ApiStatus = serde_json::from_str(r#"{"msg": "ok"}"#).unwrap();
        assert_eq!(s.error_code, 0);
    }
}
