//! Patching and projecting typed records.
//!
//! The engines only know about `Document`s. This module wires them to
//! application records through a [`Codec`], and lets the caller observe a
//! successful update through an [`UpdateHook`].

use alloc::string::{String, ToString};
use core::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tessel_document::Document;
use thiserror::Error;

use crate::apply::apply;
use crate::error::PatchError;
use crate::operation::Operation;
use crate::policy::ProtectedPaths;
use crate::project::project;

/// Errors raised by the record flow.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("failed to encode record: {0}")]
    Encode(String),
    #[error("failed to decode record: {0}")]
    Decode(String),
}

/// Converts between records and documents.
///
/// Field names must survive the round trip, since patch paths and projection
/// fields refer to them.
pub trait Codec<T> {
    fn encode(&self, record: &T) -> Result<Document, RecordError>;
    fn decode(&self, doc: &Document) -> Result<T, RecordError>;
}

/// A codec for any serde-compatible record.
pub struct SerdeCodec<T> {
    _record: PhantomData<fn() -> T>,
}

impl<T> SerdeCodec<T> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Default for SerdeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Codec<T> for SerdeCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, record: &T) -> Result<Document, RecordError> {
        let value = serde_json::to_value(record).map_err(|e| RecordError::Encode(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| RecordError::Encode(e.to_string()))
    }

    fn decode(&self, doc: &Document) -> Result<T, RecordError> {
        let value = serde_json::to_value(doc).map_err(|e| RecordError::Decode(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| RecordError::Decode(e.to_string()))
    }
}

/// Observes a record before and after a successful patch.
pub trait UpdateHook<T> {
    fn updated(&self, old: &T, new: &T);
}

impl<T, F> UpdateHook<T> for F
where
    F: Fn(&T, &T),
{
    fn updated(&self, old: &T, new: &T) {
        self(old, new)
    }
}

/// A hook that does nothing.
pub struct NoHook;

impl<T> UpdateHook<T> for NoHook {
    fn updated(&self, _old: &T, _new: &T) {}
}

/// Encodes `record`, applies `patch`, decodes the result and reports the
/// change to `hook`. The hook only runs when every step succeeded.
pub fn patch_record<T, C, H>(
    record: &T,
    patch: &[Operation],
    policy: &ProtectedPaths,
    codec: &C,
    hook: &H,
) -> Result<T, RecordError>
where
    C: Codec<T>,
    H: UpdateHook<T> + ?Sized,
{
    let doc = codec.encode(record)?;
    let patched = apply(&doc, patch, policy)?;
    let updated = codec.decode(&patched)?;
    hook.updated(record, &updated);
    Ok(updated)
}

/// Encodes `record` and projects the requested fields.
pub fn project_record<T, C, S>(
    record: &T,
    fields: &[S],
    policy: &ProtectedPaths,
    codec: &C,
) -> Result<Document, RecordError>
where
    C: Codec<T>,
    S: AsRef<str>,
{
    let doc = codec.encode(record)?;
    Ok(project(&doc, fields, policy)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use serde::Deserialize;
    use tessel_document::Pointer;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Account {
        id: u32,
        name: String,
        active: bool,
    }

    fn account() -> Account {
        Account {
            id: 7,
            name: "marla".into(),
            active: true,
        }
    }

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn test_serde_codec_keeps_field_names() {
        let codec = SerdeCodec::<Account>::new();
        let doc = codec.encode(&account()).unwrap();
        assert_eq!(doc.get("id"), Some(&Document::from(7)));
        assert_eq!(codec.decode(&doc).unwrap(), account());
    }

    #[test]
    fn test_patch_record_calls_hook_once() {
        let calls = Cell::new(0);
        let hook = |old: &Account, new: &Account| {
            assert!(old.active);
            assert!(!new.active);
            calls.set(calls.get() + 1);
        };
        let updated = patch_record(
            &account(),
            &[Operation::replace(ptr("/active"), false)],
            &ProtectedPaths::new(["id"]),
            &SerdeCodec::<Account>::new(),
            &hook,
        )
        .unwrap();
        assert!(!updated.active);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_patch_record_skips_hook_on_failure() {
        let calls = Cell::new(0);
        let hook = |_: &Account, _: &Account| calls.set(calls.get() + 1);

        let err = patch_record(
            &account(),
            &[Operation::replace(ptr("/id"), 8)],
            &ProtectedPaths::new(["id"]),
            &SerdeCodec::<Account>::new(),
            &hook,
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::Patch(PatchError::Validation(_))));

        // Decoding fails: `name` must stay a string.
        let err = patch_record(
            &account(),
            &[Operation::replace(ptr("/name"), 3)],
            &ProtectedPaths::none(),
            &SerdeCodec::<Account>::new(),
            &hook,
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::Decode(_)));
        assert_eq!(calls.get(), 0);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Ledger {
        name: String,
        id: i64,
        balance: u64,
        rate: f64,
    }

    #[test]
    fn test_patch_record_keeps_untouched_large_integers() {
        let ledger = Ledger {
            name: "a".into(),
            id: 9_007_199_254_740_993,
            balance: 10_000_000_000_000_000_000,
            rate: 0.25,
        };
        let updated = patch_record(
            &ledger,
            &[Operation::replace(ptr("/name"), "b")],
            &ProtectedPaths::none(),
            &SerdeCodec::<Ledger>::new(),
            &NoHook,
        )
        .unwrap();
        assert_eq!(
            updated,
            Ledger {
                name: "b".into(),
                ..ledger
            }
        );

        let updated = patch_record(
            &updated,
            &[Operation::replace(ptr("/id"), i64::MIN)],
            &ProtectedPaths::none(),
            &SerdeCodec::<Ledger>::new(),
            &NoHook,
        )
        .unwrap();
        assert_eq!(updated.id, i64::MIN);
        assert_eq!(updated.balance, 10_000_000_000_000_000_000);
    }

    #[test]
    fn test_project_record() {
        let doc = project_record(
            &account(),
            &["name"],
            &ProtectedPaths::new(["id"]),
            &SerdeCodec::<Account>::new(),
        )
        .unwrap();
        assert_eq!(doc.get("name"), Some(&Document::from("marla")));
        assert_eq!(doc.get("active"), None);
    }

    #[test]
    fn test_no_hook() {
        let updated = patch_record(
            &account(),
            &[Operation::add(ptr("/name"), "tyler")],
            &ProtectedPaths::none(),
            &SerdeCodec::<Account>::new(),
            &NoHook,
        )
        .unwrap();
        assert_eq!(updated.name, "tyler");
    }
}
