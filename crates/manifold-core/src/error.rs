//! Unified runtime error types for Manifold.
//!
//! All crates map their internal errors into [`RuntimeError`] for consistent
//! propagation through the ? operator. Cooperative cancellation is **not**
//! represented here — it is a normal pipeline outcome reported through the
//! runner's report value, never an error.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A malformed descriptor was rejected at registration time.
    InvalidDescriptor,
    /// Plugin construction or dependency injection failed.
    Instantiation,
    /// A processor's own logic raised an unexpected fault.
    ProcessorFault,
    /// Every candidate external-program launch attempt failed.
    UnreachableTarget,
    /// The requested resource or service was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// An internal runtime error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDescriptor => write!(f, "INVALID_DESCRIPTOR"),
            Self::Instantiation => write!(f, "INSTANTIATION"),
            Self::ProcessorFault => write!(f, "PROCESSOR_FAULT"),
            Self::UnreachableTarget => write!(f, "UNREACHABLE_TARGET"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout Manifold.
///
/// Crate-specific failures are mapped into `RuntimeError` using the
/// constructor methods or explicit `.map_err()` calls, giving the whole
/// runtime a single error type at its boundaries.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct RuntimeError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RuntimeError {
    /// Create a new runtime error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new runtime error with an underlying cause.
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

    /// Create an invalid-descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDescriptor, message)
    }

    /// Create an instantiation error naming the failed descriptor.
    pub fn instantiation(
        descriptor: impl fmt::Display,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(
            ErrorKind::Instantiation,
            format!("Failed to instantiate plugin '{descriptor}'"),
            cause,
        )
    }

    /// Create a processor-fault error naming the failed processor.
    pub fn processor_fault(
        processor: impl fmt::Display,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(
            ErrorKind::ProcessorFault,
            format!("Processor '{processor}' failed"),
            cause,
        )
    }

    /// Create an unreachable-target error referencing the URL that could not
    /// be opened.
    pub fn unreachable_target(url: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UnreachableTarget, format!("Could not open {url}"))
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = RuntimeError::invalid_descriptor("descriptor name must not be empty");
        assert_eq!(
            err.to_string(),
            "INVALID_DESCRIPTOR: descriptor name must not be empty"
        );
    }

    #[test]
    fn test_unreachable_target_references_url() {
        let err = RuntimeError::unreachable_target("https://example.org");
        assert_eq!(err.kind, ErrorKind::UnreachableTarget);
        assert!(err.message.contains("https://example.org"));
    }

    #[test]
    fn test_processor_fault_carries_cause() {
        let cause = std::io::Error::other("boom");
        let err = RuntimeError::processor_fault("check-inputs", cause);
        assert_eq!(err.kind, ErrorKind::ProcessorFault);
        assert!(err.message.contains("check-inputs"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
