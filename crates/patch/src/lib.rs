//! Tessel Patch - guarded patch application and field projection.
//!
//! This crate provides the two request engines of Tessel:
//!
//! - `apply`: applies an ordered list of patch operations atomically
//! - `project`: builds a document holding only requested top-level fields
//! - `ProtectedPaths`: the deny-list both engines check before doing anything
//! - `Operation`: add/remove/replace/move/copy/test, with its wire form
//! - `record` (feature `serde`): the same flow over typed records
//!
//! # Example
//!
//! ```rust
//! use tessel_document::{Document, DocumentObject, Pointer};
//! use tessel_patch::{apply, project, Operation, ProtectedPaths};
//!
//! let mut obj = DocumentObject::new();
//! obj.insert("firstname".into(), "tigran".into());
//! obj.insert("birthDate".into(), "1987-07-03".into());
//! let person = Document::Object(obj);
//!
//! let policy = ProtectedPaths::new(["birthDate"]);
//!
//! let patch = [Operation::replace(Pointer::parse("/firstname").unwrap(), "tyler")];
//! let patched = apply(&person, &patch, &policy).unwrap();
//! assert_eq!(patched.get("firstname"), Some(&Document::from("tyler")));
//!
//! let denied = [Operation::remove(Pointer::parse("/birthDate").unwrap())];
//! assert!(apply(&person, &denied, &policy).is_err());
//!
//! let view = project(&person, &["firstname"], &policy).unwrap();
//! assert_eq!(view.as_object().unwrap().len(), 1);
//! ```

#![no_std]

extern crate alloc;

mod apply;
mod error;
mod operation;
mod policy;
mod project;
#[cfg(feature = "serde")]
pub mod record;

pub use apply::{apply, apply_in_place};
pub use error::{PatchError, Result, ValidationError};
pub use operation::{parse_patch, Operation, OperationKind};
pub use policy::ProtectedPaths;
pub use project::project;
