//! Unified application error types for VaultShare.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Domain-rule violations carry their
//! own [`ErrorKind`] so callers can tell "does not exist" apart from
//! "exists but you have no access".

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested share does not exist.
    NotFound,
    /// The requester is not a recipient of an otherwise existing share.
    RecipientNotAllowed,
    /// Acceptance was attempted after the share's expiry timestamp.
    ShareExpired,
    /// A non-owner attempted an owner-only mutation.
    PermissionDenied,
    /// Input validation failed.
    Validation,
    /// The recipient is not in a state that permits the requested transition.
    Conflict,
    /// A repository or external-mirror call failed inside a use case.
    Dependency,
    /// A persistence backend reported a failure.
    Database,
    /// The external mirror service reported a failure.
    ExternalService,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind is a locally detected domain-rule violation.
    ///
    /// Domain-rule errors pass through the orchestrator unchanged; every
    /// other kind is wrapped as a [`ErrorKind::Dependency`] failure.
    pub fn is_domain_rule(&self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::RecipientNotAllowed
                | Self::ShareExpired
                | Self::PermissionDenied
                | Self::Validation
                | Self::Conflict
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::RecipientNotAllowed => write!(f, "RECIPIENT_NOT_ALLOWED"),
            Self::ShareExpired => write!(f, "SHARE_EXPIRED"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Dependency => write!(f, "DEPENDENCY"),
            Self::Database => write!(f, "DATABASE"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout VaultShare.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a share-not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a recipient-not-allowed error.
    pub fn recipient_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RecipientNotAllowed, message)
    }

    /// Create a share-expired error.
    pub fn share_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ShareExpired, message)
    }

    /// Create a permission-denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Attach the failing operation to a collaborator error.
    ///
    /// Domain-rule errors are returned untouched. Anything else becomes a
    /// [`ErrorKind::Dependency`] error whose message names `operation` and
    /// whose source is the original error.
    pub fn in_operation(self, operation: &str) -> Self {
        if self.kind.is_domain_rule() {
            return self;
        }
        let message = format!("{operation}: {}", self.message);
        Self::with_source(ErrorKind::Dependency, message, self)
    }

    /// Returns whether the error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::with_source(
            ErrorKind::Validation,
            format!("Invalid request: {err}"),
            err,
        )
    }
}
