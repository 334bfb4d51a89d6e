//! Field projection.

use alloc::string::ToString;
use tessel_document::{Document, DocumentObject};

use crate::error::{PatchError, Result};
use crate::policy::ProtectedPaths;

/// Builds a new object holding only the requested top-level fields of `doc`.
///
/// Fields missing from `doc` are skipped. The result follows the order of
/// `fields`; a field requested twice appears once.
pub fn project<S: AsRef<str>>(
    doc: &Document,
    fields: &[S],
    policy: &ProtectedPaths,
) -> Result<Document> {
    let source = doc
        .as_object()
        .ok_or_else(|| PatchError::type_mismatch("object", doc.kind()))?;
    policy.check_fields(fields)?;

    let mut projected = DocumentObject::with_capacity(fields.len());
    for field in fields {
        let field = field.as_ref();
        if projected.contains_key(field) {
            continue;
        }
        if let Some(value) = source.get(field) {
            projected.insert(field.to_string(), value.clone());
        }
    }

    tracing::debug!(requested = fields.len(), projected = projected.len(), "fields projected");
    Ok(Document::Object(projected))
}
