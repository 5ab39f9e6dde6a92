//! Unified application error types for GateHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Expected negative outcomes — an
//! invalid token, an absent session, a failed permission check — are *not*
//! errors; they surface as `Option`/`bool` at the call site. `AppError` is
//! reserved for failures the caller must handle.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A token failed signature, expiry, or format validation.
    InvalidToken,
    /// No session record exists (or it was lazily expired).
    SessionAbsent,
    /// A role name is not present in the registry.
    UnknownRole,
    /// A role-graph mutation would create an inheritance cycle.
    CircularInheritance,
    /// A permission string fails the `resource:action:scope` format.
    MalformedPermission,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate role, role still inherited, etc.).
    Conflict,
    /// The requested resource was not found.
    NotFound,
    /// The durable store reported an I/O failure.
    Database,
    /// A cache bookkeeping error occurred.
    Cache,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::SessionAbsent => write!(f, "SESSION_ABSENT"),
            Self::UnknownRole => write!(f, "UNKNOWN_ROLE"),
            Self::CircularInheritance => write!(f, "CIRCULAR_INHERITANCE"),
            Self::MalformedPermission => write!(f, "MALFORMED_PERMISSION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout GateHub.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls or
/// explicit `.map_err()` calls so the whole workspace shares one error
/// boundary.
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

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create a session-absent error.
    pub fn session_absent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionAbsent, message)
    }

    /// Create an unknown-role error.
    pub fn unknown_role(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownRole, message)
    }

    /// Create a circular-inheritance error.
    pub fn circular_inheritance(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CircularInheritance, message)
    }

    /// Create a malformed-permission error.
    pub fn malformed_permission(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedPermission, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
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
