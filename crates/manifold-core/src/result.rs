//! Convenience result type alias for Manifold.

use crate::error::RuntimeError;

/// A specialized `Result` type for Manifold operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, RuntimeError>` explicitly.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
