//! Error types for pointer parsing and resolution.

use alloc::string::String;
use thiserror::Error;

use crate::value::DocumentKind;

/// Errors raised while parsing a pointer or resolving it against a document.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PointerError {
    /// A required key or array element does not exist.
    #[error("path not found: {pointer}")]
    NotFound { pointer: String },
    /// An array token is malformed or out of range.
    #[error("invalid array index '{token}' in {pointer}")]
    InvalidIndex { pointer: String, token: String },
    /// A `~` in the path is not followed by `0` or `1`.
    #[error("invalid escape sequence in path: {path}")]
    InvalidEscape { path: String },
    /// The parent of the final token is a scalar, so nothing can be added under it.
    #[error("cannot add under {found} at {pointer}")]
    NotContainer { pointer: String, found: DocumentKind },
}

impl PointerError {
    /// Creates a not found error.
    pub fn not_found(pointer: impl Into<String>) -> Self {
        PointerError::NotFound {
            pointer: pointer.into(),
        }
    }

    /// Creates an invalid index error.
    pub fn invalid_index(pointer: impl Into<String>, token: impl Into<String>) -> Self {
        PointerError::InvalidIndex {
            pointer: pointer.into(),
            token: token.into(),
        }
    }
}
