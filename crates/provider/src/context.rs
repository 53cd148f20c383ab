//! Per-request operation context.
//!
//! Responsibilities:
//! - Carry `{connector kind, operation, connection name, start time,
//!   correlation id}` for one host request.
//! - Own the `saviynt_operation` tracing span and emit begin/end/error events
//!   inside it.
//! - Build [`ProviderError`]s stamped with the context, sanitizing messages
//!   at the construction site.
//!
//! Does NOT handle:
//! - Deciding error categories; callers pick them.
//!
//! Invariants:
//! - A context lives for exactly one host request and is never shared.
//! - Every message that reaches an error or a log record passes through the
//!   context's [`Sanitizer`] first.

use chrono::{DateTime, Utc};
use saviynt_client::ClientError;
use std::fmt;
use tracing::{Span, error, info, info_span};
use uuid::Uuid;

use crate::descriptor::Descriptor;
use crate::errors::{ErrorCategory, ProviderError, error_code};
use crate::retry::AuthRetryError;
use crate::sanitize::Sanitizer;

/// Host operation being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Configure,
    Create,
    Read,
    Update,
    Delete,
    Import,
    DataSourceRead,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Configure => "configure",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
            Operation::DataSourceRead => "data_source_read",
        }
    }

    const fn failure_phrase(&self) -> &'static str {
        match self {
            Operation::Configure => "Configuration Failed",
            Operation::Create => "Creation Failed",
            Operation::Read | Operation::DataSourceRead => "Read Failed",
            Operation::Update => "Update Failed",
            Operation::Delete => "Deletion Failed",
            Operation::Import => "Import Failed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an operation acts on: drives log fields, error codes and titles.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Label for the `connector_kind` log field (e.g. `REST`).
    pub kind: &'static str,
    /// Prefix of generated error codes (e.g. `REST`).
    pub code_prefix: &'static str,
    /// Subject used in host-facing titles (e.g. `REST Connection`).
    pub title: String,
}

impl Scope {
    pub fn connector(descriptor: &Descriptor) -> Self {
        Self {
            kind: descriptor.display_name,
            code_prefix: descriptor.code_prefix,
            title: format!("{} Connection", descriptor.display_name),
        }
    }

    pub fn security_system() -> Self {
        Self {
            kind: "SecuritySystem",
            code_prefix: "SECURITY_SYSTEM",
            title: "Security System".to_string(),
        }
    }

    pub fn connections_listing() -> Self {
        Self {
            kind: "Connections",
            code_prefix: "CONNECTIONS",
            title: "Connections".to_string(),
        }
    }

    pub fn provider() -> Self {
        Self {
            kind: "Provider",
            code_prefix: "PROVIDER",
            title: "Saviynt Provider".to_string(),
        }
    }
}

/// Context of one host request.
pub struct OperationContext {
    scope: Scope,
    operation: Operation,
    connection_name: String,
    started_at: DateTime<Utc>,
    correlation_id: Uuid,
    sanitizer: Sanitizer,
    span: Span,
}

impl OperationContext {
    /// Open a context and emit the begin event.
    pub fn begin(scope: Scope, operation: Operation, connection_name: impl Into<String>) -> Self {
        let connection_name = connection_name.into();
        let correlation_id = Uuid::new_v4();
        let span = info_span!(
            "saviynt_operation",
            connector_kind = scope.kind,
            operation = operation.as_str(),
            connection_name = %connection_name,
            correlation_id = %correlation_id,
        );
        span.in_scope(|| info!("operation started"));
        Self {
            scope,
            operation,
            connection_name,
            started_at: Utc::now(),
            correlation_id,
            sanitizer: Sanitizer::new(),
            span,
        }
    }

    /// Replace the sanitizer (descriptor secret names, config secret values).
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn connection_name(&self) -> &str {
        &self.connection_name
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn sanitize(&self, message: &str) -> String {
        self.sanitizer.sanitize(message)
    }

    fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }

    /// Emit the end event.
    pub fn finish(&self) {
        let elapsed_ms = self.elapsed_ms();
        self.span
            .in_scope(|| info!(elapsed_ms, "operation completed"));
    }

    /// Host-facing title, e.g. "REST Connection Creation Failed".
    pub fn failure_title(&self) -> String {
        format!("{} {}", self.scope.title, self.operation.failure_phrase())
    }

    /// Build a sanitized, context-stamped error and emit the error event.
    pub fn error(&self, category: ErrorCategory, message: impl AsRef<str>) -> ProviderError {
        self.build_error(category, message.as_ref(), None)
    }

    /// Convert a transport error under the given category.
    ///
    /// Token rejection after a refresh and login failures become
    /// [`ErrorCategory::Authentication`] regardless of `category`.
    pub fn client_error(&self, category: ErrorCategory, err: ClientError) -> ProviderError {
        let category = if err.is_auth_error() {
            ErrorCategory::Authentication
        } else {
            category
        };
        let message = err.to_string();
        self.build_error(category, &message, Some(err))
    }

    /// Convert a retry-harness failure under the given category.
    pub fn retry_error(&self, category: ErrorCategory, err: AuthRetryError) -> ProviderError {
        match err {
            AuthRetryError::Cancelled => {
                self.error(ErrorCategory::Cancelled, "operation cancelled by the host")
            }
            AuthRetryError::Unauthorized(e) => {
                let message = format!("token rejected again after refresh: {}", e);
                self.build_error(ErrorCategory::Authentication, &message, Some(e))
            }
            AuthRetryError::RefreshFailed(e) => {
                let message = format!("token refresh failed: {}", e);
                self.build_error(ErrorCategory::Authentication, &message, Some(e))
            }
            AuthRetryError::Client(e) => self.client_error(category, e),
        }
    }

    fn build_error(
        &self,
        category: ErrorCategory,
        message: &str,
        source: Option<ClientError>,
    ) -> ProviderError {
        let message = format!(
            "{} (operation={}, connection={}, correlation_id={})",
            self.sanitize(message),
            self.operation,
            self.connection_name,
            self.correlation_id
        );
        let code = error_code(self.scope.code_prefix, category);
        let elapsed_ms = self.elapsed_ms();
        self.span.in_scope(|| {
            error!(error_code = %code, category = %category, elapsed_ms, detail = %message, "operation failed")
        });
        ProviderError {
            category,
            code,
            summary: self.failure_title(),
            message,
            correlation_id: Some(self.correlation_id),
            source,
        }
    }
}

impl fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationContext")
            .field("kind", &self.scope.kind)
            .field("operation", &self.operation)
            .field("connection_name", &self.connection_name)
            .field("correlation_id", &self.correlation_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_ctx(op: Operation) -> OperationContext {
        OperationContext::begin(
            Scope {
                kind: "REST",
                code_prefix: "REST",
                title: "REST Connection".to_string(),
            },
            op,
            "acc_rest_1",
        )
    }

    #[test]
    fn test_failure_titles() {
        assert_eq!(
            rest_ctx(Operation::Create).failure_title(),
            "REST Connection Creation Failed"
        );
        assert_eq!(
            rest_ctx(Operation::Update).failure_title(),
            "REST Connection Update Failed"
        );
    }

    #[test]
    fn test_error_is_stamped_and_sanitized() {
        let ctx = rest_ctx(Operation::Create);
        let err = ctx.error(ErrorCategory::CreateFailed, "rejected password=hunter2");
        assert_eq!(err.code, "REST_CREATE_FAILED_008");
        assert!(err.message.contains("password=[REDACTED]"));
        assert!(!err.message.contains("hunter2"));
        assert!(err.message.contains("operation=create"));
        assert!(err.message.contains("connection=acc_rest_1"));
        assert!(err.message.contains(&ctx.correlation_id().to_string()));
        assert_eq!(err.correlation_id, Some(ctx.correlation_id()));
    }

    #[test]
    fn test_unauthorized_client_error_is_authentication() {
        let ctx = rest_ctx(Operation::Read);
        let err = ctx.client_error(
            ErrorCategory::ReadFailed,
            ClientError::Unauthorized {
                url: "u".to_string(),
                message: "expired".to_string(),
            },
        );
        assert_eq!(err.category, ErrorCategory::Authentication);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_correlation_ids_differ_per_request() {
        let a = rest_ctx(Operation::Read);
        let b = rest_ctx(Operation::Read);
        assert_ne!(a.correlation_id(), b.correlation_id());
        assert!(a.started_at() <= Utc::now());
    }
}
