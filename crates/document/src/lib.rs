//! Tessel Document - generic document tree for Tessel.
//!
//! This crate provides:
//!
//! - `Document`: the tree value (object/array/scalar) patches act on
//! - `DocumentObject`: an insertion-ordered object
//! - `Number`: an exact number (integers are never widened to floats)
//! - `Pointer`: a decoded slash-delimited path into a document
//! - `resolve`: pointer resolution returning a `Location`
//! - Serde support behind the `serde` feature
//!
//! # Example
//!
//! ```rust
//! use tessel_document::{resolve, Document, DocumentObject, Pointer, ResolveMode, Slot};
//!
//! let mut obj = DocumentObject::new();
//! obj.insert("tags".into(), Document::Array(vec!["a".into(), "b".into()]));
//! let doc = Document::Object(obj);
//!
//! let pointer = Pointer::parse("/tags/-").unwrap();
//! let location = resolve(&doc, &pointer, ResolveMode::Add).unwrap();
//! assert_eq!(location.slot, Slot::Append);
//!
//! let pointer = Pointer::parse("/tags/1").unwrap();
//! assert_eq!(doc.pointer(&pointer), Some(&Document::from("b")));
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "serde")]
mod codec;
mod error;
mod number;
pub mod pointer;
mod value;

pub use error::PointerError;
pub use number::Number;
pub use pointer::{parent_mut, resolve, Location, Pointer, ResolveMode, Slot, APPEND_TOKEN};
pub use value::{Document, DocumentKind, DocumentObject};
