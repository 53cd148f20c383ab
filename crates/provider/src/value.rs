//! Tri-state attribute values and the adapters between host state and the
//! transport layer.
//!
//! Responsibilities:
//! - [`Attr`]: a host attribute that is either unknown (not yet decided),
//!   explicitly null, or set to a value.
//! - Plan-to-wire adapters that drop unknowns and apply the null policy.
//! - Wire-to-state adapters that map absent fields to null.
//!
//! Invariants:
//! - Unknown never reaches a request body.
//! - A secret attribute read back from the server is always null.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A host-side attribute value: `unknown | null | value`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attr<T> {
    /// Not known until apply; the user did not declare it.
    #[default]
    Unknown,
    /// Explicitly null.
    Null,
    /// Explicitly set.
    Value(T),
}

impl<T> Attr<T> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Attr::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    /// True when a value is set.
    pub fn is_set(&self) -> bool {
        matches!(self, Attr::Value(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Attr<&T> {
        match self {
            Attr::Unknown => Attr::Unknown,
            Attr::Null => Attr::Null,
            Attr::Value(v) => Attr::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Unknown => Attr::Unknown,
            Attr::Null => Attr::Null,
            Attr::Value(v) => Attr::Value(f(v)),
        }
    }

    /// Resolve an unknown to null; used when finalising state after apply.
    pub fn known_or_null(self) -> Attr<T> {
        match self {
            Attr::Unknown => Attr::Null,
            other => other,
        }
    }
}

impl<T> From<Option<T>> for Attr<T> {
    /// A field absent from a response becomes null.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Attr::Value(v),
            None => Attr::Null,
        }
    }
}

impl From<&str> for Attr<String> {
    fn from(value: &str) -> Self {
        Attr::Value(value.to_string())
    }
}

impl Attr<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.value().map(String::as_str)
    }
}

/// How an explicit null is rendered in a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Leave the field out of the body.
    Omit,
    /// Send an empty string, which clears the field on the server.
    EmptyString,
}

/// Plan-to-wire for string attributes.
pub fn string_to_wire(attr: &Attr<String>, policy: NullPolicy) -> Option<String> {
    match attr {
        Attr::Unknown => None,
        Attr::Null => match policy {
            NullPolicy::Omit => None,
            NullPolicy::EmptyString => Some(String::new()),
        },
        Attr::Value(v) => Some(v.clone()),
    }
}

/// Wire-to-state for optional strings. Absent fields become null.
pub fn string_from_wire(value: Option<&str>) -> Attr<String> {
    value.map(str::to_string).into()
}

/// Wire-to-state for a secret attribute: never echoes the server's value.
pub fn secret_from_wire<T>() -> Attr<T> {
    Attr::Null
}

/// A single scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int64(i64),
    String(String),
    Timeout(crate::model::TimeoutConfig),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int64(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<crate::model::TimeoutConfig> for AttrValue {
    fn from(value: crate::model::TimeoutConfig) -> Self {
        AttrValue::Timeout(value)
    }
}

/// Parse a JSON scalar the server sent as a string, number or bool into an `i64`.
pub fn json_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a JSON scalar into a `bool`, accepting `"true"`/`"false"`/`1`/`0`.
pub fn json_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Render a JSON scalar as a string. Objects and arrays are serialized.
pub fn json_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
