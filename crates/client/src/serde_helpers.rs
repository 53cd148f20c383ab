//! Serde helpers for Saviynt's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or strings for numeric fields (`errorCode`
//!   arrives as `0` from some endpoints and `"0"` from others).
//! - Accept numbers, booleans or strings for free-form attribute values.
//!
//! Invariants / assumptions:
//! - Error-code normalization happens here, at the transport boundary;
//!   downstream code only ever sees `i64`.
//! - These helpers must not log or print values; errors are generic parse errors.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
}

fn parse_i64<E: serde::de::Error>(value: StringOrNumber) -> Result<i64, E> {
    match value {
        StringOrNumber::I64(v) => Ok(v),
        StringOrNumber::U64(v) => i64::try_from(v).map_err(E::custom),
        StringOrNumber::F64(v) => Ok(v as i64),
        StringOrNumber::String(s) => s.trim().parse::<i64>().map_err(E::custom),
        StringOrNumber::Bool(_) => Err(E::custom("expected number, got boolean")),
    }
}

/// Deserialize an `i64` from a JSON number or numeric string.
pub fn i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = StringOrNumber::deserialize(deserializer)?;
    parse_i64(value)
}

/// Deserialize an optional `i64`; null, missing and empty string map to `None`.
pub fn opt_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => parse_i64(value).map(Some),
    }
}

/// Deserialize an optional string from a JSON string, number or boolean.
pub fn opt_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::I64(v) => v.to_string(),
        StringOrNumber::U64(v) => v.to_string(),
        StringOrNumber::F64(v) => v.to_string(),
        StringOrNumber::Bool(v) => v.to_string(),
    }))
}

/// Deserialize a string into a [`secrecy::SecretString`].
pub fn secret_string<'de, D>(deserializer: D) -> Result<secrecy::SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(secrecy::SecretString::new(s.into()))
}

/// Deserialize an optional string into an optional [`secrecy::SecretString`].
pub fn opt_secret_string<'de, D>(
    deserializer: D,
) -> Result<Option<secrecy::SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| secrecy::SecretString::new(s.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Status {
        #[serde(deserialize_with = "i64_from_string_or_number")]
        code: i64,
        #[serde(default, deserialize_with = "opt_i64_from_string_or_number")]
        key: Option<i64>,
        #[serde(default, deserialize_with = "opt_string_from_any")]
        status: Option<String>,
    }

    #[test]
    fn test_error_code_as_number_or_string() {
        let a: Status = serde_json::from_str(r#"{"code": 0}"#).unwrap();
        let b: Status = serde_json::from_str(r#"{"code": "0"}"#).unwrap();
        assert_eq!(a.code, 0);
        assert_eq!(b.code, 0);
    }

    #[test]
    fn test_optional_key_empty_string_is_none() {
        let s: Status = serde_json::from_str(r#"{"code": 1, "key": ""}"#).unwrap();
        assert_eq!(s.key, None);
        let s: Status = serde_json::from_str(r#"{"code": 1, "key": "42"}"#).unwrap();
        assert_eq!(s.key, Some(42));
        let s: Status = serde_json::from_str(r#"{"code": 1}"#).unwrap();
        assert_eq!(s.key, None);
    }

    #[test]
    fn test_string_from_any() {
        let s: Status = serde_json::from_str(r#"{"code": 0, "status": 1}"#).unwrap();
        assert_eq!(s.status.as_deref(), Some("1"));
        let s: Status = serde_json::from_str(r#"{"code": 0, "status": true}"#).unwrap();
        assert_eq!(s.status.as_deref(), Some("true"));
    }

    #[test]
    fn test_non_numeric_code_is_rejected() {
        assert!(serde_json::from_str::<Status>(r#"{"code": "abc"}"#).is_err());
    }
}
