//! Error taxonomy for the provider.
//!
//! Responsibilities:
//! - A fixed set of [`ErrorCategory`] values, each with a stable ordinal.
//! - Error codes of the form `<KIND>_<CATEGORY>_<NNN>` for operator grep-ability.
//! - [`ProviderError`], the single error type every operation surfaces.
//!
//! Does NOT handle:
//! - Message sanitization (see `sanitize.rs`); errors are built through the
//!   operation context, which sanitizes before construction.
//!
//! Invariants:
//! - A category's ordinal never changes once released.
//! - `ProviderError::message` is already sanitized.
//! - Ordinals 1-12 are the core taxonomy ([`ErrorCategory::CORE`]). Ordinals
//!   13-18 extend it for conditions the core set has no name for:
//!   `TypeImmutable` (connection type changed on Update),
//!   `UnsupportedVersion` (version-gated attribute), `Authentication`
//!   (login failure or a second 401), `Cancelled` (host cancellation),
//!   `PartialProvisioning` (security system created, update phase
//!   unfinished) and `DeleteRefused` (Delete outside acceptance tests).

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::diagnostics::{Diagnostic, Severity};

/// Result alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Fixed error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    ProviderConfig,
    PlanExtraction,
    StateExtraction,
    ConfigExtraction,
    MissingIdentifier,
    DuplicateName,
    NameImmutable,
    CreateFailed,
    ReadFailed,
    UpdateFailed,
    ApiError,
    StateUpdate,
    TypeImmutable,
    UnsupportedVersion,
    Authentication,
    Cancelled,
    PartialProvisioning,
    DeleteRefused,
}

impl ErrorCategory {
    /// Every category, in ordinal order.
    pub const ALL: [ErrorCategory; 18] = [
        ErrorCategory::ProviderConfig,
        ErrorCategory::PlanExtraction,
        ErrorCategory::StateExtraction,
        ErrorCategory::ConfigExtraction,
        ErrorCategory::MissingIdentifier,
        ErrorCategory::DuplicateName,
        ErrorCategory::NameImmutable,
        ErrorCategory::CreateFailed,
        ErrorCategory::ReadFailed,
        ErrorCategory::UpdateFailed,
        ErrorCategory::ApiError,
        ErrorCategory::StateUpdate,
        ErrorCategory::TypeImmutable,
        ErrorCategory::UnsupportedVersion,
        ErrorCategory::Authentication,
        ErrorCategory::Cancelled,
        ErrorCategory::PartialProvisioning,
        ErrorCategory::DeleteRefused,
    ];

    /// The core taxonomy every connector kind shares.
    pub const CORE: [ErrorCategory; 12] = [
        ErrorCategory::ProviderConfig,
        ErrorCategory::PlanExtraction,
        ErrorCategory::StateExtraction,
        ErrorCategory::ConfigExtraction,
        ErrorCategory::MissingIdentifier,
        ErrorCategory::DuplicateName,
        ErrorCategory::NameImmutable,
        ErrorCategory::CreateFailed,
        ErrorCategory::ReadFailed,
        ErrorCategory::UpdateFailed,
        ErrorCategory::ApiError,
        ErrorCategory::StateUpdate,
    ];

    /// True for categories outside [`ErrorCategory::CORE`].
    pub const fn is_extension(&self) -> bool {
        self.ordinal() > 12
    }

    /// Upper-snake label used inside error codes.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::ProviderConfig => "PROVIDER_CONFIG",
            ErrorCategory::PlanExtraction => "PLAN_EXTRACTION",
            ErrorCategory::StateExtraction => "STATE_EXTRACTION",
            ErrorCategory::ConfigExtraction => "CONFIG_EXTRACTION",
            ErrorCategory::MissingIdentifier => "MISSING_IDENTIFIER",
            ErrorCategory::DuplicateName => "DUPLICATE_NAME",
            ErrorCategory::NameImmutable => "NAME_IMMUTABLE",
            ErrorCategory::CreateFailed => "CREATE_FAILED",
            ErrorCategory::ReadFailed => "READ_FAILED",
            ErrorCategory::UpdateFailed => "UPDATE_FAILED",
            ErrorCategory::ApiError => "API_ERROR",
            ErrorCategory::StateUpdate => "STATE_UPDATE",
            ErrorCategory::TypeImmutable => "TYPE_IMMUTABLE",
            ErrorCategory::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCategory::Authentication => "AUTHENTICATION",
            ErrorCategory::Cancelled => "CANCELLED",
            ErrorCategory::PartialProvisioning => "PARTIAL_PROVISIONING",
            ErrorCategory::DeleteRefused => "DELETE_REFUSED",
        }
    }

    /// Stable 1-based ordinal.
    pub const fn ordinal(&self) -> u16 {
        match self {
            ErrorCategory::ProviderConfig => 1,
            ErrorCategory::PlanExtraction => 2,
            ErrorCategory::StateExtraction => 3,
            ErrorCategory::ConfigExtraction => 4,
            ErrorCategory::MissingIdentifier => 5,
            ErrorCategory::DuplicateName => 6,
            ErrorCategory::NameImmutable => 7,
            ErrorCategory::CreateFailed => 8,
            ErrorCategory::ReadFailed => 9,
            ErrorCategory::UpdateFailed => 10,
            ErrorCategory::ApiError => 11,
            ErrorCategory::StateUpdate => 12,
            ErrorCategory::TypeImmutable => 13,
            ErrorCategory::UnsupportedVersion => 14,
            ErrorCategory::Authentication => 15,
            ErrorCategory::Cancelled => 16,
            ErrorCategory::PartialProvisioning => 17,
            ErrorCategory::DeleteRefused => 18,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build an error code: `<KIND>_<CATEGORY>_<NNN>`.
pub fn error_code(kind_prefix: &str, category: ErrorCategory) -> String {
    format!(
        "{}_{}_{:03}",
        kind_prefix.to_ascii_uppercase(),
        category.as_str(),
        category.ordinal()
    )
}

/// The error every provider operation surfaces.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct ProviderError {
    pub category: ErrorCategory,
    pub code: String,
    /// Short host-facing title, e.g. "REST Connection Creation Failed".
    pub summary: String,
    /// Sanitized detail, stamped with the operation context.
    pub message: String,
    pub correlation_id: Option<Uuid>,
    #[source]
    pub source: Option<saviynt_client::ClientError>,
}

impl ProviderError {
    /// Build an error outside any operation context (provider wiring).
    pub fn new(
        kind_prefix: &str,
        category: ErrorCategory,
        summary: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code: error_code(kind_prefix, category),
            summary: summary.into(),
            message: message.into(),
            correlation_id: None,
            source: None,
        }
    }

    pub fn is(&self, category: ErrorCategory) -> bool {
        self.category == category
    }

    /// Host-facing diagnostic: detail begins with `[<code>]`.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            summary: self.summary.clone(),
            detail: format!("[{}] {}", self.code, self.message),
        }
    }
}

impl From<&ProviderError> for Diagnostic {
    fn from(err: &ProviderError) -> Self {
        err.to_diagnostic()
    }
}
