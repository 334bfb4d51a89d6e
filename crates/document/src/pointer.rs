//! Slash-delimited pointers and their resolution against a `Document`.
//!
//! A pointer is parsed once into decoded tokens:
//! - `""` - the document root
//! - `/a/b` - key `b` of key `a`
//! - `/list/0` - first element of `list`
//! - `/list/-` - append position of `list` (final token only)
//! - `~1` and `~0` decode to `/` and `~`
//!
//! A path without the leading slash (`firstname`) is read as if it had one.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::PointerError;
use crate::value::Document;

/// Token denoting the position past the last element of an array.
pub const APPEND_TOKEN: &str = "-";

/// A parsed pointer into a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// The pointer to the document root.
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Builds a pointer from already decoded tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a pointer from its string form.
    pub fn parse(path: &str) -> Result<Self, PointerError> {
        if path.is_empty() {
            return Ok(Self::root());
        }
        let body = path.strip_prefix('/').unwrap_or(path);
        let tokens = body
            .split('/')
            .map(|raw| {
                unescape(raw).ok_or_else(|| PointerError::InvalidEscape {
                    path: path.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    /// Returns the decoded tokens.
    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns true if this pointer denotes the document root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the top-level field this pointer goes through.
    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Returns the final token.
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Returns the pointer to the containing node, or None for the root.
    pub fn parent(&self) -> Option<Pointer> {
        let (_, rest) = self.tokens.split_last()?;
        Some(Pointer {
            tokens: rest.to_vec(),
        })
    }

    /// Appends a decoded token.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Returns true if `other` lies strictly below this pointer.
    pub fn is_prefix_of(&self, other: &Pointer) -> bool {
        self.tokens.len() < other.tokens.len() && other.tokens.starts_with(&self.tokens)
    }
}

fn unescape(raw: &str) -> Option<String> {
    if !raw.contains('~') {
        return Some(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str("/")?;
            for c in token.chars() {
                match c {
                    '~' => f.write_str("~0")?,
                    '/' => f.write_str("~1")?,
                    _ => fmt::Write::write_char(f, c)?,
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl From<&[&str]> for Pointer {
    fn from(tokens: &[&str]) -> Self {
        Pointer::from_tokens(tokens.iter().copied())
    }
}

/// Parses a canonical array index: ASCII digits, no sign, no leading zeros.
pub(crate) fn parse_index(token: &str) -> Option<usize> {
    let bytes = token.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    token.parse().ok()
}

/// How the final token of a pointer is allowed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveMode {
    /// The target must already exist.
    Read,
    /// The target may be a new object key, `-`, or the index equal to the
    /// array length.
    Add,
}

/// The final position a pointer designates inside its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The pointer is the root; there is no parent.
    Root,
    /// A key of the parent object.
    Key(String),
    /// An index of the parent array.
    Index(usize),
    /// Past the end of the parent array.
    Append,
}

/// A resolved position inside a document.
#[derive(Clone, Debug)]
pub struct Location<'a> {
    /// The containing object or array; None for the root.
    pub parent: Option<&'a Document>,
    /// The key or index within `parent`.
    pub slot: Slot,
    /// The value currently stored at the slot, if any.
    pub value: Option<&'a Document>,
}

/// Resolves `pointer` against `doc`.
///
/// Every token but the last must name an existing key or in-range index.
/// The last token is checked according to `mode`.
pub fn resolve<'a>(
    doc: &'a Document,
    pointer: &Pointer,
    mode: ResolveMode,
) -> Result<Location<'a>, PointerError> {
    let Some((last, ancestors)) = pointer.tokens.split_last() else {
        return Ok(Location {
            parent: None,
            slot: Slot::Root,
            value: Some(doc),
        });
    };

    let mut current = doc;
    for token in ancestors {
        current = step(current, token, pointer)?;
    }

    let slot = final_slot(current, last, mode, pointer)?;
    let value = match (&slot, current) {
        (Slot::Key(key), Document::Object(obj)) => obj.get(key),
        (Slot::Index(idx), Document::Array(arr)) => arr.get(*idx),
        _ => None,
    };
    Ok(Location {
        parent: Some(current),
        slot,
        value,
    })
}

/// Walks to the node that contains the pointer's final token.
pub fn parent_mut<'a>(
    doc: &'a mut Document,
    pointer: &Pointer,
) -> Result<&'a mut Document, PointerError> {
    let ancestors = match pointer.tokens.split_last() {
        Some((_, ancestors)) => ancestors,
        None => return Err(PointerError::not_found(pointer.to_string())),
    };
    let mut current = doc;
    for token in ancestors {
        current = step_mut(current, token, pointer)?;
    }
    Ok(current)
}

fn step<'a>(
    node: &'a Document,
    token: &str,
    pointer: &Pointer,
) -> Result<&'a Document, PointerError> {
    match node {
        Document::Object(obj) => obj
            .get(token)
            .ok_or_else(|| PointerError::not_found(pointer.to_string())),
        Document::Array(arr) => {
            let idx = existing_index(arr.len(), token, pointer)?;
            Ok(&arr[idx])
        }
        _ => Err(PointerError::not_found(pointer.to_string())),
    }
}

fn step_mut<'a>(
    node: &'a mut Document,
    token: &str,
    pointer: &Pointer,
) -> Result<&'a mut Document, PointerError> {
    match node {
        Document::Object(obj) => obj
            .get_mut(token)
            .ok_or_else(|| PointerError::not_found(pointer.to_string())),
        Document::Array(arr) => {
            let idx = existing_index(arr.len(), token, pointer)?;
            Ok(&mut arr[idx])
        }
        _ => Err(PointerError::not_found(pointer.to_string())),
    }
}

fn existing_index(len: usize, token: &str, pointer: &Pointer) -> Result<usize, PointerError> {
    match parse_index(token) {
        Some(idx) if idx < len => Ok(idx),
        _ => Err(PointerError::invalid_index(pointer.to_string(), token)),
    }
}

fn final_slot(
    parent: &Document,
    token: &str,
    mode: ResolveMode,
    pointer: &Pointer,
) -> Result<Slot, PointerError> {
    match parent {
        Document::Object(obj) => {
            if mode == ResolveMode::Read && !obj.contains_key(token) {
                return Err(PointerError::not_found(pointer.to_string()));
            }
            Ok(Slot::Key(token.to_string()))
        }
        Document::Array(arr) => {
            if token == APPEND_TOKEN {
                return match mode {
                    ResolveMode::Add => Ok(Slot::Append),
                    ResolveMode::Read => {
                        Err(PointerError::invalid_index(pointer.to_string(), token))
                    }
                };
            }
            let idx = parse_index(token)
                .ok_or_else(|| PointerError::invalid_index(pointer.to_string(), token))?;
            let in_range = match mode {
                ResolveMode::Read => idx < arr.len(),
                ResolveMode::Add => idx <= arr.len(),
            };
            if in_range {
                Ok(Slot::Index(idx))
            } else {
                Err(PointerError::invalid_index(pointer.to_string(), token))
            }
        }
        scalar => match mode {
            ResolveMode::Read => Err(PointerError::not_found(pointer.to_string())),
            ResolveMode::Add => Err(PointerError::NotContainer {
                pointer: pointer.to_string(),
                found: scalar.kind(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DocumentObject;
    use alloc::vec;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    fn sample() -> Document {
        let mut inner = DocumentObject::new();
        inner.insert("c".into(), Document::from(3));
        let mut obj = DocumentObject::new();
        obj.insert("a".into(), Document::Object(inner));
        obj.insert(
            "list".into(),
            Document::Array(vec![Document::from("x"), Document::from("y")]),
        );
        obj.insert("name".into(), Document::from("tigran"));
        Document::Object(obj)
    }

    #[test]
    fn test_parse_tokens() {
        assert!(ptr("").is_root());
        assert_eq!(ptr("/a/b").tokens(), &["a", "b"]);
        assert_eq!(ptr("/").tokens(), &[""]);
        assert_eq!(ptr("/a~1b/c~0d").tokens(), &["a/b", "c~d"]);
        assert_eq!(ptr("/~01").tokens(), &["~1"]);
    }

    #[test]
    fn test_parse_without_leading_slash() {
        assert_eq!(ptr("firstname"), ptr("/firstname"));
        assert_eq!(ptr("a/b").tokens(), &["a", "b"]);
    }

    #[test]
    fn test_parse_invalid_escape() {
        assert!(matches!(
            Pointer::parse("/a~2"),
            Err(PointerError::InvalidEscape { .. })
        ));
        assert!(Pointer::parse("/a~").is_err());
    }

    #[test]
    fn test_display_escapes() {
        let p = Pointer::from_tokens(["a/b", "c~d"]);
        assert_eq!(p.to_string(), "/a~1b/c~0d");
        assert_eq!(Pointer::root().to_string(), "");
        assert_eq!(ptr(&p.to_string()), p);
    }

    #[test]
    fn test_prefix_and_parent() {
        assert!(ptr("/a").is_prefix_of(&ptr("/a/b")));
        assert!(!ptr("/a").is_prefix_of(&ptr("/a")));
        assert!(!ptr("/a").is_prefix_of(&ptr("/ab")));
        assert!(Pointer::root().is_prefix_of(&ptr("/a")));
        assert_eq!(ptr("/a/b").parent(), Some(ptr("/a")));
        assert_eq!(Pointer::root().parent(), None);
        assert_eq!(ptr("/a/b").first(), Some("a"));
    }

    #[test]
    fn test_resolve_root() {
        let doc = sample();
        let loc = resolve(&doc, &Pointer::root(), ResolveMode::Read).unwrap();
        assert!(loc.parent.is_none());
        assert_eq!(loc.slot, Slot::Root);
        assert_eq!(loc.value, Some(&doc));
    }

    #[test]
    fn test_resolve_existing() {
        let doc = sample();
        let loc = resolve(&doc, &ptr("/a/c"), ResolveMode::Read).unwrap();
        assert_eq!(loc.slot, Slot::Key("c".into()));
        assert_eq!(loc.value, Some(&Document::from(3)));

        let loc = resolve(&doc, &ptr("/list/1"), ResolveMode::Read).unwrap();
        assert_eq!(loc.slot, Slot::Index(1));
        assert_eq!(loc.value, Some(&Document::from("y")));
    }

    #[test]
    fn test_resolve_missing_key() {
        let doc = sample();
        assert!(matches!(
            resolve(&doc, &ptr("/missing"), ResolveMode::Read),
            Err(PointerError::NotFound { .. })
        ));
        let loc = resolve(&doc, &ptr("/missing"), ResolveMode::Add).unwrap();
        assert_eq!(loc.slot, Slot::Key("missing".into()));
        assert!(loc.value.is_none());

        // Only the final token may be missing under Add.
        assert!(matches!(
            resolve(&doc, &ptr("/missing/x"), ResolveMode::Add),
            Err(PointerError::NotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_array_tokens() {
        let doc = sample();
        assert_eq!(
            resolve(&doc, &ptr("/list/-"), ResolveMode::Add).unwrap().slot,
            Slot::Append
        );
        assert_eq!(
            resolve(&doc, &ptr("/list/2"), ResolveMode::Add).unwrap().slot,
            Slot::Index(2)
        );
        for bad in ["/list/2", "/list/-", "/list/01", "/list/-1", "/list/x", "/list/"] {
            assert!(
                matches!(
                    resolve(&doc, &ptr(bad), ResolveMode::Read),
                    Err(PointerError::InvalidIndex { .. })
                ),
                "{bad} should be an invalid index"
            );
        }
        assert!(matches!(
            resolve(&doc, &ptr("/list/3"), ResolveMode::Add),
            Err(PointerError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn test_resolve_through_scalar() {
        let doc = sample();
        assert!(matches!(
            resolve(&doc, &ptr("/name/first"), ResolveMode::Read),
            Err(PointerError::NotFound { .. })
        ));
        assert!(matches!(
            resolve(&doc, &ptr("/name/first"), ResolveMode::Add),
            Err(PointerError::NotContainer { .. })
        ));
        assert!(matches!(
            resolve(&doc, &ptr("/name/first/x"), ResolveMode::Add),
            Err(PointerError::NotFound { .. })
        ));
    }

    #[test]
    fn test_parent_mut() {
        let mut doc = sample();
        let parent = parent_mut(&mut doc, &ptr("/a/c")).unwrap();
        parent
            .as_object_mut()
            .unwrap()
            .insert("d".into(), Document::Null);
        assert_eq!(doc.pointer(&ptr("/a/d")), Some(&Document::Null));
        assert!(parent_mut(&mut doc, &Pointer::root()).is_err());
    }
}
