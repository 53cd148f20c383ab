//! Mock-server fixtures must never carry real-looking credentials.
//!
//! Invariants:
//! - Every fixture under `crates/*/fixtures` parses as JSON.
//! - Any string stored under a secret-looking key is an obvious placeholder.

use serde_json::Value;
use std::fs;
use std::path::Path;

const SECRET_KEY_MARKERS: &[&str] = &["password", "secret", "token", "privatekey", "apikey"];
const PLACEHOLDER_MARKERS: &[&str] = &["fixture", "example", "never", "placeholder", "test"];

fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase().replace(['_', '-'], "");
    SECRET_KEY_MARKERS.iter().any(|m| key.contains(m)) && key != "tokentype"
}

fn is_placeholder(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    value.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m))
}

/// Collect `path = value` for every secret-keyed string that is not a placeholder.
fn leaked_secrets(value: &Value, path: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}.{key}");
                if let Value::String(s) = child
                    && is_secret_key(key)
                    && !is_placeholder(s)
                {
                    out.push(child_path.clone());
                }
                leaked_secrets(child, &child_path, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                leaked_secrets(child, &format!("{path}[{i}]"), out);
            }
        }
        _ => {}
    }
}

#[test]
fn test_fixtures_hold_only_placeholder_secrets() {
    let crates_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates directory");
    let mut checked = 0;
    let mut leaks = Vec::new();

    for entry in walkdir::WalkDir::new(crates_dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != "target")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path().extension().is_some_and(|ext| ext == "json")
                && e.path().components().any(|c| c.as_os_str() == "fixtures")
        })
    {
        let content = fs::read_to_string(entry.path()).expect("read fixture");
        let json: Value = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("{} is not valid JSON: {e}", entry.path().display()));
        let mut found = Vec::new();
        leaked_secrets(&json, "$", &mut found);
        leaks.extend(found.into_iter().map(|p| format!("{}: {p}", entry.path().display())));
        checked += 1;
    }

    assert!(checked > 0, "no fixtures found under crates/*/fixtures");
    assert!(
        leaks.is_empty(),
        "fixtures carry non-placeholder secrets:\n{}",
        leaks.join("\n")
    );
}

#[test]
fn test_secret_key_detection() {
    assert!(is_secret_key("PASSWORD"));
    assert!(is_secret_key("access_token"));
    assert!(is_secret_key("client_secret"));
    assert!(!is_secret_key("token_type"));
    assert!(!is_secret_key("USERNAME"));

    let mut found = Vec::new();
    leaked_secrets(
        &serde_json::json!({"attrs": {"PASSWORD": "hunter2", "URL": "x"}}),
        "$",
        &mut found,
    );
    assert_eq!(found, vec!["$.attrs.PASSWORD".to_string()]);
}
