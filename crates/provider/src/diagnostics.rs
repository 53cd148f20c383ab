//! Host-facing diagnostics and operation outcomes.

use crate::errors::{ProviderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One host-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

/// Successful result of an operation: the new state plus any warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub state: T,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    pub fn new(state: T) -> Self {
        Self {
            state,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(state: T, warnings: Vec<Diagnostic>) -> Self {
        Self { state, warnings }
    }
}

/// What the host receives: state when the operation succeeded, plus every
/// diagnostic produced along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct HostResponse<T> {
    pub state: Option<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> HostResponse<T> {
    pub fn has_error(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

impl<T> From<Result<Outcome<T>>> for HostResponse<T> {
    fn from(result: Result<Outcome<T>>) -> Self {
        match result {
            Ok(outcome) => HostResponse {
                state: Some(outcome.state),
                diagnostics: outcome.warnings,
            },
            Err(err) => HostResponse::from(err),
        }
    }
}

impl<T> From<ProviderError> for HostResponse<T> {
    fn from(err: ProviderError) -> Self {
        HostResponse {
            state: None,
            diagnostics: vec![err.to_diagnostic()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;

    #[test]
    fn test_success_carries_warnings() {
        let outcome = Outcome::with_warnings(1, vec![Diagnostic::warning("w", "d")]);
        let resp: HostResponse<i32> = Ok(outcome).into();
        assert_eq!(resp.state, Some(1));
        assert!(!resp.has_error());
        assert_eq!(resp.warnings().count(), 1);
    }

    #[test]
    fn test_error_has_no_state() {
        let err = ProviderError::new("AD", ErrorCategory::ReadFailed, "AD Connection Read Failed", "x");
        let resp: HostResponse<i32> = Err(err).into();
        assert!(resp.state.is_none());
        assert!(resp.has_error());
    }
}
