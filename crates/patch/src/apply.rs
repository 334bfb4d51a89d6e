//! Patch application.
//!
//! A patch is applied to a working copy of the caller's document. The copy is
//! only handed back once every operation has succeeded, so a failing
//! operation never leaves partial effects behind.

use tessel_document::{parent_mut, resolve, Document, Pointer, PointerError, ResolveMode, Slot};

use crate::error::{PatchError, Result};
use crate::operation::Operation;
use crate::policy::ProtectedPaths;

/// Applies `patch` to `doc` and returns the patched document.
///
/// The policy is checked against every operation before any of them runs.
/// `doc` is never modified.
pub fn apply(doc: &Document, patch: &[Operation], policy: &ProtectedPaths) -> Result<Document> {
    policy.check_operations(patch)?;

    let mut working = doc.clone();
    for (index, op) in patch.iter().enumerate() {
        if let Err(err) = apply_operation(&mut working, op) {
            tracing::debug!(index, op = %op.kind(), path = %op.path(), error = %err, "patch operation failed");
            return Err(err);
        }
    }

    tracing::debug!(operations = patch.len(), "patch applied");
    Ok(working)
}

/// Applies `patch` to a document the caller owns.
///
/// On failure `doc` keeps its previous value.
pub fn apply_in_place(
    doc: &mut Document,
    patch: &[Operation],
    policy: &ProtectedPaths,
) -> Result<()> {
    *doc = apply(doc, patch, policy)?;
    Ok(())
}

/// Applies one operation to the working document.
pub(crate) fn apply_operation(doc: &mut Document, op: &Operation) -> Result<()> {
    match op {
        Operation::Add { path, value } => add(doc, path, value.clone()),
        Operation::Remove { path } => remove(doc, path).map(drop),
        Operation::Replace { path, value } => replace(doc, path, value.clone()),
        Operation::Move { from, path } => move_value(doc, from, path),
        Operation::Copy { from, path } => {
            let value = read(doc, from)?.clone();
            add(doc, path, value)
        }
        Operation::Test { path, value } => {
            if read(doc, path)? == value {
                Ok(())
            } else {
                Err(PatchError::test_failed(path))
            }
        }
    }
}

fn read<'a>(doc: &'a Document, path: &Pointer) -> Result<&'a Document> {
    resolve(doc, path, ResolveMode::Read)?
        .value
        .ok_or_else(|| not_found(path))
}

fn add(doc: &mut Document, path: &Pointer, value: Document) -> Result<()> {
    let slot = resolve(doc, path, ResolveMode::Add)?.slot;
    if slot == Slot::Root {
        *doc = value;
        return Ok(());
    }

    match (parent_mut(doc, path)?, slot) {
        (Document::Object(obj), Slot::Key(key)) => {
            obj.insert(key, value);
        }
        (Document::Array(arr), Slot::Index(idx)) => arr.insert(idx, value),
        (Document::Array(arr), Slot::Append) => arr.push(value),
        (parent, _) => return Err(PatchError::type_mismatch("object or array", parent.kind())),
    }
    Ok(())
}

fn remove(doc: &mut Document, path: &Pointer) -> Result<Document> {
    let slot = resolve(doc, path, ResolveMode::Read)?.slot;
    if slot == Slot::Root {
        return Ok(doc.take());
    }

    match (parent_mut(doc, path)?, slot) {
        (Document::Object(obj), Slot::Key(key)) => obj.remove(&key).ok_or_else(|| not_found(path)),
        (Document::Array(arr), Slot::Index(idx)) => Ok(arr.remove(idx)),
        (parent, _) => Err(PatchError::type_mismatch("object or array", parent.kind())),
    }
}

fn replace(doc: &mut Document, path: &Pointer, value: Document) -> Result<()> {
    resolve(doc, path, ResolveMode::Read)?;
    let target = doc.pointer_mut(path).ok_or_else(|| not_found(path))?;
    *target = value;
    Ok(())
}

fn move_value(doc: &mut Document, from: &Pointer, path: &Pointer) -> Result<()> {
    if from.is_prefix_of(path) {
        return Err(PatchError::cyclic_move(from, path));
    }
    if from == path {
        read(doc, from)?;
        return Ok(());
    }
    let value = remove(doc, from)?;
    add(doc, path, value)
}

fn not_found(path: &Pointer) -> PatchError {
    PatchError::Pointer(PointerError::not_found(alloc::format!("{}", path)))
}
