//! Patch operations and their wire representation.
//!
//! The wire form of an operation is an object with the members
//! `op`, `path`, and depending on the kind `value` or `from`:
//!
//! ```text
//! { "op": "replace", "path": "/firstname", "value": "tyler" }
//! { "op": "move", "from": "/a", "path": "/b" }
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use tessel_document::{Document, DocumentObject, Pointer};

use crate::error::{PatchError, Result};

/// A single patch instruction.
///
/// Each variant carries exactly the members its kind requires.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "op", rename_all = "lowercase")
)]
pub enum Operation {
    Add { path: Pointer, value: Document },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Document },
    Move { from: Pointer, path: Pointer },
    Copy { from: Pointer, path: Pointer },
    Test { path: Pointer, value: Document },
}

/// The kind of an operation, as named on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl OperationKind {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Remove => "remove",
            OperationKind::Replace => "replace",
            OperationKind::Move => "move",
            OperationKind::Copy => "copy",
            OperationKind::Test => "test",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(OperationKind::Add),
            "remove" => Ok(OperationKind::Remove),
            "replace" => Ok(OperationKind::Replace),
            "move" => Ok(OperationKind::Move),
            "copy" => Ok(OperationKind::Copy),
            "test" => Ok(OperationKind::Test),
            other => Err(PatchError::malformed(alloc::format!(
                "unknown op '{}'",
                other
            ))),
        }
    }
}

impl Operation {
    pub fn add(path: Pointer, value: impl Into<Document>) -> Self {
        Operation::Add {
            path,
            value: value.into(),
        }
    }

    pub fn remove(path: Pointer) -> Self {
        Operation::Remove { path }
    }

    pub fn replace(path: Pointer, value: impl Into<Document>) -> Self {
        Operation::Replace {
            path,
            value: value.into(),
        }
    }

    pub fn move_from(from: Pointer, path: Pointer) -> Self {
        Operation::Move { from, path }
    }

    pub fn copy_from(from: Pointer, path: Pointer) -> Self {
        Operation::Copy { from, path }
    }

    pub fn test(path: Pointer, value: impl Into<Document>) -> Self {
        Operation::Test {
            path,
            value: value.into(),
        }
    }

    /// Returns the kind of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Add { .. } => OperationKind::Add,
            Operation::Remove { .. } => OperationKind::Remove,
            Operation::Replace { .. } => OperationKind::Replace,
            Operation::Move { .. } => OperationKind::Move,
            Operation::Copy { .. } => OperationKind::Copy,
            Operation::Test { .. } => OperationKind::Test,
        }
    }

    /// Returns the target pointer.
    pub fn path(&self) -> &Pointer {
        match self {
            Operation::Add { path, .. }
            | Operation::Remove { path }
            | Operation::Replace { path, .. }
            | Operation::Move { path, .. }
            | Operation::Copy { path, .. }
            | Operation::Test { path, .. } => path,
        }
    }

    /// Returns the source pointer of a move or copy.
    pub fn from_path(&self) -> Option<&Pointer> {
        match self {
            Operation::Move { from, .. } | Operation::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Returns the value carried by an add, replace or test.
    pub fn value(&self) -> Option<&Document> {
        match self {
            Operation::Add { value, .. }
            | Operation::Replace { value, .. }
            | Operation::Test { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Decodes an operation from its wire object.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| PatchError::malformed("operation must be an object"))?;
        let kind: OperationKind = string_member(obj, "op")?.parse()?;
        let path = pointer_member(obj, "path")?;

        let op = match kind {
            OperationKind::Add => Operation::Add {
                path,
                value: value_member(obj)?,
            },
            OperationKind::Remove => Operation::Remove { path },
            OperationKind::Replace => Operation::Replace {
                path,
                value: value_member(obj)?,
            },
            OperationKind::Move => Operation::Move {
                from: pointer_member(obj, "from")?,
                path,
            },
            OperationKind::Copy => Operation::Copy {
                from: pointer_member(obj, "from")?,
                path,
            },
            OperationKind::Test => Operation::Test {
                path,
                value: value_member(obj)?,
            },
        };
        Ok(op)
    }

    /// Encodes this operation as its wire object.
    pub fn to_document(&self) -> Document {
        let mut obj = DocumentObject::with_capacity(3);
        obj.insert("op".into(), Document::from(self.kind().as_str()));
        if let Some(from) = self.from_path() {
            obj.insert("from".into(), Document::String(from.to_string()));
        }
        obj.insert("path".into(), Document::String(self.path().to_string()));
        if let Some(value) = self.value() {
            obj.insert("value".into(), value.clone());
        }
        Document::Object(obj)
    }
}

/// Decodes a whole patch from its wire array.
pub fn parse_patch(doc: &Document) -> Result<Vec<Operation>> {
    let items = doc
        .as_array()
        .ok_or_else(|| PatchError::malformed("patch must be an array"))?;
    items.iter().map(Operation::from_document).collect()
}

fn string_member<'a>(obj: &'a DocumentObject, name: &str) -> Result<&'a str> {
    match obj.get(name) {
        Some(Document::String(s)) => Ok(s.as_str()),
        Some(other) => Err(PatchError::malformed(alloc::format!(
            "member '{}' must be a string, found {}",
            name,
            other.kind()
        ))),
        None => Err(PatchError::malformed(alloc::format!(
            "missing member '{}'",
            name
        ))),
    }
}

fn pointer_member(obj: &DocumentObject, name: &str) -> Result<Pointer> {
    let raw = string_member(obj, name)?;
    Pointer::parse(raw).map_err(|e| PatchError::malformed(e.to_string()))
}

fn value_member(obj: &DocumentObject) -> Result<Document> {
    obj.get("value")
        .cloned()
        .ok_or_else(|| PatchError::malformed(String::from("missing member 'value'")))
}
