//! Field-level access policy.
//!
//! `ProtectedPaths` is a deny-list of top-level field names. It is built once
//! when the application is configured and shared read-only across calls;
//! there is no API to change it afterwards.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;
use tessel_document::Pointer;

use crate::error::ValidationError;
use crate::operation::Operation;

/// Top-level fields that requests may never touch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProtectedPaths {
    fields: HashSet<String>,
}

impl ProtectedPaths {
    /// Creates a policy protecting the given field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that protects nothing.
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if `field` is protected.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Returns the protected names in sorted order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Checks a single top-level field name.
    pub fn check(&self, field: &str) -> Result<(), ValidationError> {
        if self.contains(field) {
            tracing::warn!(field, "rejected request touching protected field");
            return Err(ValidationError::new(field));
        }
        Ok(())
    }

    /// Checks requested projection fields. Each name is checked as given,
    /// since projection looks it up as a direct key, and by its first path
    /// segment, so `address/city` is also checked as `address`.
    ///
    /// Segments split the way [`Pointer::parse`] splits them: one leading
    /// slash is dropped, so `//id` starts with an empty segment.
    pub fn check_fields<S: AsRef<str>>(&self, fields: &[S]) -> Result<(), ValidationError> {
        fields.iter().try_for_each(|field| {
            let field = field.as_ref();
            self.check(field)?;
            let rest = field.strip_prefix('/').unwrap_or(field);
            let top = rest.split('/').next().unwrap_or(rest);
            self.check(top)
        })
    }

    /// Checks every pointer of every operation before anything is applied.
    pub fn check_operations(&self, operations: &[Operation]) -> Result<(), ValidationError> {
        for op in operations {
            let (path_writes, from_writes) = match op {
                Operation::Test { .. } => (false, false),
                Operation::Copy { .. } => (true, false),
                Operation::Move { .. } => (true, true),
                _ => (true, false),
            };
            self.check_pointer(op.path(), path_writes)?;
            if let Some(from) = op.from_path() {
                self.check_pointer(from, from_writes)?;
            }
        }
        Ok(())
    }

    fn check_pointer(&self, pointer: &Pointer, writes: bool) -> Result<(), ValidationError> {
        match pointer.first() {
            Some(field) => self.check(field),
            // Writing the root rewrites every top-level field, protected ones included.
            None if writes => match self.sorted().first() {
                Some(field) => self.check(field),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ProtectedPaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ProtectedPaths {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProtectedPaths {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::new(fields))
    }
}
