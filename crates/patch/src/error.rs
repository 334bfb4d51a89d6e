//! Error types for patch application and projection.

use alloc::string::String;
use tessel_document::{DocumentKind, Pointer, PointerError};
use thiserror::Error;

/// Result type alias for patch and projection calls.
pub type Result<T> = core::result::Result<T, PatchError>;

/// A request touched a protected top-level field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("field '{field}' is protected and cannot be patched or projected")]
pub struct ValidationError {
    pub field: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// Error types for patch application and projection.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PatchError {
    /// A protected field was targeted; nothing was applied.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A pointer did not resolve.
    #[error(transparent)]
    Pointer(PointerError),
    /// A container was expected but another kind of value was found.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: DocumentKind,
    },
    /// A `test` operation did not hold.
    #[error("test failed at {path}")]
    TestFailed { path: String },
    /// A `move` would place a value inside itself.
    #[error("cannot move {from} into its own descendant {path}")]
    CyclicMove { from: String, path: String },
    /// An operation in wire form could not be decoded.
    #[error("malformed operation: {reason}")]
    MalformedOperation { reason: String },
}

impl From<PointerError> for PatchError {
    fn from(err: PointerError) -> Self {
        match err {
            PointerError::NotContainer { found, .. } => PatchError::TypeMismatch {
                expected: "object or array",
                found,
            },
            other => PatchError::Pointer(other),
        }
    }
}

impl PatchError {
    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &'static str, found: DocumentKind) -> Self {
        PatchError::TypeMismatch { expected, found }
    }

    /// Creates a test failure error.
    pub fn test_failed(path: &Pointer) -> Self {
        PatchError::TestFailed {
            path: alloc::format!("{}", path),
        }
    }

    /// Creates a cyclic move error.
    pub fn cyclic_move(from: &Pointer, path: &Pointer) -> Self {
        PatchError::CyclicMove {
            from: alloc::format!("{}", from),
            path: alloc::format!("{}", path),
        }
    }

    /// Creates a malformed operation error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        PatchError::MalformedOperation {
            reason: reason.into(),
        }
    }

    /// Returns the protected field if this is a validation failure.
    pub fn protected_field(&self) -> Option<&str> {
        match self {
            PatchError::Validation(err) => Some(err.field.as_str()),
            _ => None,
        }
    }
}
