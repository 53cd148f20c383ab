//! Secret sanitization for log records and surfaced messages.
//!
//! Responsibilities:
//! - Redact values that follow a secret-bearing attribute name
//!   (`password=...`, `"CLIENT_SECRET": "..."`).
//! - Redact bearer tokens.
//! - Redact any literal secret value the current operation knows about.
//!
//! Does NOT handle:
//! - Deciding which attributes are secret (descriptor rows declare that).
//!
//! Invariants:
//! - Sanitizing is idempotent: sanitizing an already-sanitized string is a no-op.
//! - Secret values are only exposed for comparison, never copied into the output.

use secrecy::{ExposeSecret, SecretString};

/// Replacement text for redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Attribute names treated as secret-bearing regardless of descriptor.
const DEFAULT_SECRET_NAMES: &[&str] = &[
    "password",
    "passwd",
    "passphrase",
    "secret",
    "token",
    "authorization",
    "apikey",
    "api_key",
    "private_key",
    "sshkey",
];

/// Redacts secrets from free-form text.
#[derive(Clone, Default)]
pub struct Sanitizer {
    names: Vec<String>,
    values: Vec<SecretString>,
}

impl Sanitizer {
    /// Sanitizer with the default secret-bearing names.
    pub fn new() -> Self {
        Self {
            names: DEFAULT_SECRET_NAMES.iter().map(|s| s.to_string()).collect(),
            values: Vec::new(),
        }
    }

    /// Add attribute names whose values must be redacted.
    pub fn with_names<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names {
            let name = name.to_ascii_lowercase();
            if !name.is_empty() && !self.names.contains(&name) {
                self.names.push(name);
            }
        }
        self
    }

    /// Add literal secret values that must never appear in output.
    pub fn with_values(mut self, values: impl IntoIterator<Item = SecretString>) -> Self {
        self.values
            .extend(values.into_iter().filter(|v| !v.expose_secret().is_empty()));
        self
    }

    /// Redact every known secret from `input`.
    pub fn sanitize(&self, input: &str) -> String {
        let mut out = input.to_string();
        for value in &self.values {
            let value = value.expose_secret();
            if out.contains(value) {
                out = out.replace(value, REDACTED);
            }
        }
        out = redact_after(&out, "bearer ", false);
        for name in &self.names {
            out = redact_after(&out, name, true);
        }
        out
    }
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer")
            .field("names", &self.names)
            .field("values", &self.values.len())
            .finish()
    }
}

/// Redact the value that follows each occurrence of `key`.
///
/// With `needs_separator`, the key must be followed (after an optional
/// closing quote and spaces) by `=` or `:`.
fn redact_after(input: &str, key: &str, needs_separator: bool) -> String {
    let lower = input.to_ascii_lowercase();
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    let mut search = 0;

    while let Some(rel) = lower[search..].find(key) {
        let start = search + rel;
        let mut i = start + key.len();
        search = i;

        if needs_separator {
            if i < bytes.len() && matches!(bytes[i], b'"' | b'\'') {
                i += 1;
            }
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
            if i >= bytes.len() || !matches!(bytes[i], b'=' | b':') {
                continue;
            }
            i += 1;
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
        }

        if input[i..].starts_with(REDACTED) {
            search = i + REDACTED.len();
            continue;
        }

        let quote = match bytes.get(i) {
            Some(q @ (b'"' | b'\'')) => {
                i += 1;
                Some(*q)
            }
            _ => None,
        };
        let value_start = i;
        if quote.is_none() && matches!(bytes.get(i), Some(b'{' | b'[')) {
            i = matching_bracket_end(bytes, i);
        } else {
            while i < bytes.len() {
                let b = bytes[i];
                let at_end = match quote {
                    Some(q) => b == q,
                    None => {
                        b.is_ascii_whitespace()
                            || matches!(b, b',' | b'&' | b';' | b'}' | b')' | b']' | b'"' | b'\'')
                    }
                };
                if at_end {
                    break;
                }
                i += 1;
            }
        }
        if i == value_start {
            continue;
        }

        out.push_str(&input[cursor..value_start]);
        out.push_str(REDACTED);
        cursor = i;
        search = i;
    }

    out.push_str(&input[cursor..]);
    out
}

/// Index just past the bracket that closes the one at `open`, or the end
/// of input when it never closes. Brackets inside quoted strings are ignored.
fn matching_bracket_end(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return open + offset + 1;
                }
            }
            _ => {}
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_redacts_key_value_pairs() {
        let s = Sanitizer::new();
        assert_eq!(
            s.sanitize("login failed: password=hunter2 user=admin"),
            "login failed: password=[REDACTED] user=admin"
        );
        assert_eq!(
            s.sanitize(r#"{"access_token": "eyJabc", "msg": "ok"}"#),
            r#"{"access_token": "[REDACTED]", "msg": "ok"}"#
        );
    }

    #[test]
    fn test_redacts_bearer_tokens() {
        let s = Sanitizer::new();
        assert_eq!(
            s.sanitize("request rejected for Bearer abc.def.ghi"),
            "request rejected for Bearer [REDACTED]"
        );
        let header = s.sanitize("Authorization: Bearer abc.def.ghi");
        assert!(!header.contains("abc.def.ghi"));
    }

    #[test]
    fn test_words_without_separator_are_kept() {
        let s = Sanitizer::new();
        assert_eq!(s.sanitize("token expired"), "token expired");
        assert_eq!(s.sanitize("Connection Successful"), "Connection Successful");
    }

    #[test]
    fn test_descriptor_names_and_literal_values() {
        let s = Sanitizer::new()
            .with_names(["ConnectionJSON"])
            .with_values([secret("s3cr3t-value")]);
        assert_eq!(
            s.sanitize(r#"bad ConnectionJSON={"k":[1,"}"]} and s3cr3t-value leaked"#),
            "bad ConnectionJSON=[REDACTED] and [REDACTED] leaked"
        );
    }

    #[test]
    fn test_handles_multibyte_text() {
        let s = Sanitizer::new();
        assert_eq!(
            s.sanitize("échec: password=ünïcødé fin"),
            "échec: password=[REDACTED] fin"
        );
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(input in ".{0,80}") {
            let s = Sanitizer::new().with_names(["client_secret"]);
            let once = s.sanitize(&input);
            prop_assert_eq!(s.sanitize(&once), once.clone());
        }

        #[test]
        fn secret_values_never_survive(value in "[a-zA-Z0-9]{6,20}") {
            let s = Sanitizer::new().with_values([secret(&value)]);
            let out = s.sanitize(&format!("server echoed {} back", value));
            prop_assert!(!out.contains(&value));
        }
    }
}
