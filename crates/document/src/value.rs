//! Document type definitions for Tessel.
//!
//! This module defines the `Document` enum, the generic tree value that
//! patch and projection operations act on.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::number::Number;
use crate::pointer::Pointer;

/// A semi-structured document value.
#[derive(Clone, Debug)]
pub enum Document {
    /// JSON null
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, integers kept exact
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<Document>),
    /// JSON object, keys kept in insertion order
    Object(DocumentObject),
}

/// The variant tag of a `Document`, used in error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Null => "null",
            DocumentKind::Bool => "boolean",
            DocumentKind::Number => "number",
            DocumentKind::String => "string",
            DocumentKind::Array => "array",
            DocumentKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// An object whose entries keep the order in which keys were first inserted.
#[derive(Clone, Debug, Default)]
pub struct DocumentObject {
    entries: Vec<(String, Document)>,
}

impl DocumentObject {
    /// Creates a new empty DocumentObject.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a DocumentObject with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the object is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    /// Gets a mutable value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.position(key).map(move |idx| &mut self.entries[idx].1)
    }

    /// Inserts a key-value pair and returns the previous value, if any.
    ///
    /// Overwriting an existing key keeps its position.
    pub fn insert(&mut self, key: String, value: Document) -> Option<Document> {
        match self.position(&key) {
            Some(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes a key and returns its value if present. Later keys keep their
    /// relative order.
    pub fn remove(&mut self, key: &str) -> Option<Document> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Returns true if the object contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over key-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for DocumentObject {
    fn eq(&self, other: &Self) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl FromIterator<(String, Document)> for DocumentObject {
    fn from_iter<I: IntoIterator<Item = (String, Document)>>(iter: I) -> Self {
        let mut obj = DocumentObject::new();
        for (key, value) in iter {
            obj.insert(key, value);
        }
        obj
    }
}

impl IntoIterator for DocumentObject {
    type Item = (String, Document);
    type IntoIter = alloc::vec::IntoIter<(String, Document)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Document {
    /// Returns the variant tag of this value.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Null => DocumentKind::Null,
            Document::Bool(_) => DocumentKind::Bool,
            Document::Number(_) => DocumentKind::Number,
            Document::String(_) => DocumentKind::String,
            Document::Array(_) => DocumentKind::Array,
            Document::Object(_) => DocumentKind::Object,
        }
    }

    /// Returns true if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Returns true if this is a boolean value.
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Document::Bool(_))
    }

    /// Returns true if this is a number value.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Document::Number(_))
    }

    /// Returns true if this is a string value.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Document::String(_))
    }

    /// Returns true if this is an array value.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Document::Array(_))
    }

    /// Returns true if this is an object value.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Document::Object(_))
    }

    /// Returns true for arrays and objects.
    #[inline]
    pub fn is_container(&self) -> bool {
        self.is_array() || self.is_object()
    }

    /// Returns the boolean value if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a Number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Document::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the number as f64 if this is a Number.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// Returns the number as i64 if this is an integral Number in range.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// Returns the number as u64 if this is a non-negative integral Number in range.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(Number::as_u64)
    }

    /// Returns a reference to the string if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array.
    pub fn as_array(&self) -> Option<&Vec<Document>> {
        match self {
            Document::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a mutable reference to the array if this is an Array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Document>> {
        match self {
            Document::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object.
    pub fn as_object(&self) -> Option<&DocumentObject> {
        match self {
            Document::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object if this is an Object.
    pub fn as_object_mut(&mut self) -> Option<&mut DocumentObject> {
        match self {
            Document::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Gets a value by key if this is an Object.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Gets a value by index if this is an Array.
    pub fn get_index(&self, index: usize) -> Option<&Document> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    /// Looks up the value a pointer refers to, if it exists.
    pub fn pointer(&self, pointer: &Pointer) -> Option<&Document> {
        let mut current = self;
        for token in pointer.tokens() {
            current = match current {
                Document::Object(obj) => obj.get(token)?,
                Document::Array(arr) => arr.get(crate::pointer::parse_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Mutable counterpart of [`Document::pointer`].
    pub fn pointer_mut(&mut self, pointer: &Pointer) -> Option<&mut Document> {
        let mut current = self;
        for token in pointer.tokens() {
            current = match current {
                Document::Object(obj) => obj.get_mut(token)?,
                Document::Array(arr) => arr.get_mut(crate::pointer::parse_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Takes the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Document {
        core::mem::replace(self, Document::Null)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Document::Null, Document::Null) => true,
            (Document::Bool(a), Document::Bool(b)) => a == b,
            (Document::Number(a), Document::Number(b)) => a == b,
            (Document::String(a), Document::String(b)) => a == b,
            (Document::Array(a), Document::Array(b)) => a == b,
            (Document::Object(a), Document::Object(b)) => a == b,
            _ => false,
        }
    }
}

// From implementations for convenient construction
impl From<bool> for Document {
    fn from(v: bool) -> Self {
        Document::Bool(v)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Document {
                fn from(v: $ty) -> Self {
                    Document::Number(Number::from(v))
                }
            }
        )*
    };
}

from_number!(i32, i64, u32, u64, f64);

impl From<Number> for Document {
    fn from(v: Number) -> Self {
        Document::Number(v)
    }
}

impl From<String> for Document {
    fn from(v: String) -> Self {
        Document::String(v)
    }
}

impl From<&str> for Document {
    fn from(v: &str) -> Self {
        Document::String(v.to_string())
    }
}

impl From<Vec<Document>> for Document {
    fn from(v: Vec<Document>) -> Self {
        Document::Array(v)
    }
}

impl From<DocumentObject> for Document {
    fn from(v: DocumentObject) -> Self {
        Document::Object(v)
    }
}

impl<T> From<Option<T>> for Document
where
    T: Into<Document>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Document::Null,
        }
    }
}
