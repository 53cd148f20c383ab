//! Library crates log through `tracing`, never straight to stdout/stderr.
//!
//! Invariants:
//! - No `println!`, `eprintln!` or `dbg!` in `crates/{provider,client,config}/src`
//!   outside `#[cfg(test)]` modules.
//!
//! Non-scope: test files under `tests/` and this crate are not checked.

use std::fs;
use std::path::Path;

const LIBRARY_SOURCES: &[&str] = &["crates/provider/src", "crates/client/src", "crates/config/src"];
const FORBIDDEN: &[&str] = &["println!", "eprintln!", "dbg!"];

fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root")
}

/// Offending `(line_number, line)` pairs before the first `#[cfg(test)]`.
fn violations(content: &str) -> Vec<(usize, String)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//") && FORBIDDEN.iter().any(|m| trimmed.contains(m))
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

#[test]
fn test_library_code_logs_through_tracing() {
    let root = workspace_root();
    let mut found = Vec::new();

    for dir in LIBRARY_SOURCES {
        for entry in walkdir::WalkDir::new(root.join(dir))
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        {
            let content = fs::read_to_string(entry.path()).unwrap_or_default();
            for (line, text) in violations(&content) {
                found.push(format!("{}:{line}: {text}", entry.path().display()));
            }
        }
    }

    assert!(
        found.is_empty(),
        "use tracing macros instead of printing:\n{}",
        found.join("\n")
    );
}

#[test]
fn test_violations_ignore_test_modules_and_comments() {
    let source = r#"fn run() {
    // println!("commented out");
    tracing::info!("ok");
}

#[cfg(test)]
mod tests {
    fn helper() { println!("fine in tests"); }
}
"#;
    assert!(violations(source).is_empty());

    let source = "fn run() {\n    eprintln!(\"oops\");\n}\n";
    assert_eq!(violations(source), vec![(2, "eprintln!(\"oops\");".to_string())]);
}
