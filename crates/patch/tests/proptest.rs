//! Property-based tests for tessel-patch using proptest.

use proptest::prelude::*;
use tessel_document::{Document, DocumentObject, Pointer};
use tessel_patch::{apply, project, Operation, PatchError, ProtectedPaths};

const KEYS: &[&str] = &["a", "b", "c", "d", "e", "f"];

fn scalar() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::Bool),
        (-1000i64..1000).prop_map(Document::from),
        "[a-z]{0,6}".prop_map(Document::String),
    ]
}

fn value() -> impl Strategy<Value = Document> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Document::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..4).prop_map(|entries| {
                Document::Object(
                    entries
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect::<DocumentObject>(),
                )
            }),
        ]
    })
}

fn object_document() -> impl Strategy<Value = Document> {
    prop::collection::vec((prop::sample::select(KEYS), value()), 0..6).prop_map(|entries| {
        Document::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<DocumentObject>(),
        )
    })
}

fn top_pointer() -> impl Strategy<Value = Pointer> {
    prop::sample::select(KEYS).prop_map(|k| Pointer::from_tokens([k]))
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (top_pointer(), value()).prop_map(|(p, v)| Operation::add(p, v)),
        top_pointer().prop_map(Operation::remove),
        (top_pointer(), value()).prop_map(|(p, v)| Operation::replace(p, v)),
        (top_pointer(), top_pointer()).prop_map(|(f, p)| Operation::move_from(f, p)),
        (top_pointer(), top_pointer()).prop_map(|(f, p)| Operation::copy_from(f, p)),
        (top_pointer(), scalar()).prop_map(|(p, v)| Operation::test(p, v)),
    ]
}

proptest! {
    /// A failing patch leaves the input untouched and returns no document.
    #[test]
    fn failing_patch_is_atomic(
        doc in object_document(),
        ops in prop::collection::vec(operation(), 0..6),
    ) {
        let before = doc.clone();
        let mut patch = ops;
        patch.push(Operation::remove(Pointer::from_tokens(["missing", "key"])));

        let result = apply(&doc, &patch, &ProtectedPaths::none());
        prop_assert!(result.is_err());
        prop_assert_eq!(doc, before);
    }

    /// Any operation on a protected top-level field rejects the whole patch.
    #[test]
    fn protected_field_is_never_patched(
        doc in object_document(),
        ops in prop::collection::vec(operation(), 0..6),
        insert_at in 0usize..6,
        v in value(),
    ) {
        let policy = ProtectedPaths::new(["secret"]);
        let before = doc.clone();
        let mut ops = ops;
        let at = insert_at.min(ops.len());
        ops.insert(at, Operation::replace(Pointer::from_tokens(["secret", "x"]), v));

        let err = apply(&doc, &ops, &policy).unwrap_err();
        prop_assert_eq!(err.protected_field(), Some("secret"));
        prop_assert_eq!(doc, before);
    }

    /// Protected fields cannot be projected either.
    #[test]
    fn protected_field_is_never_projected(
        doc in object_document(),
        fields in prop::collection::vec(prop::sample::select(KEYS), 0..4),
    ) {
        let policy = ProtectedPaths::new(["c"]);
        let result = project(&doc, &fields, &policy);
        if fields.contains(&"c") {
            let err = result.unwrap_err();
            prop_assert_eq!(err.protected_field(), Some("c"));
        } else {
            let view = result.unwrap();
            prop_assert!(view.get("c").is_none());
        }
    }

    /// Replacing twice gives the same document as replacing once.
    #[test]
    fn replace_is_idempotent(doc in object_document(), key in prop::sample::select(KEYS), v in value()) {
        let op = Operation::replace(Pointer::from_tokens([key]), v);
        let policy = ProtectedPaths::none();
        match apply(&doc, &[op.clone()], &policy) {
            Ok(once) => {
                let twice = apply(&once, &[op], &policy).unwrap();
                prop_assert_eq!(once, twice);
            }
            Err(err) => prop_assert!(matches!(err, PatchError::Pointer(_))),
        }
    }

    /// Projection keeps exactly the requested keys that exist, with equal values.
    #[test]
    fn projection_is_selective(
        doc in object_document(),
        fields in prop::collection::vec(prop::sample::select(KEYS), 0..6),
    ) {
        let view = project(&doc, &fields, &ProtectedPaths::none()).unwrap();
        let view = view.as_object().unwrap();
        let source = doc.as_object().unwrap();

        for (key, value) in view.iter() {
            prop_assert!(fields.iter().any(|f| *f == key));
            prop_assert_eq!(source.get(key), Some(value));
        }
        for field in &fields {
            prop_assert_eq!(view.contains_key(field), source.contains_key(field));
        }
    }

    /// Replacing with null keeps the key; removing drops it.
    #[test]
    fn null_is_not_missing(doc in object_document(), key in prop::sample::select(KEYS)) {
        prop_assume!(doc.get(key).is_some());
        let pointer = Pointer::from_tokens([key]);
        let policy = ProtectedPaths::none();

        let nulled = apply(&doc, &[Operation::replace(pointer.clone(), Document::Null)], &policy).unwrap();
        let removed = apply(&doc, &[Operation::remove(pointer)], &policy).unwrap();

        prop_assert_eq!(nulled.get(key), Some(&Document::Null));
        prop_assert_eq!(removed.get(key), None);
        prop_assert_ne!(nulled, removed);
    }

    /// A successful `test` of the current value never changes the document.
    #[test]
    fn test_of_current_value_passes(doc in object_document(), key in prop::sample::select(KEYS)) {
        prop_assume!(doc.get(key).is_some());
        let current = doc.get(key).cloned().unwrap();
        let out = apply(&doc, &[Operation::test(Pointer::from_tokens([key]), current)], &ProtectedPaths::none()).unwrap();
        prop_assert_eq!(out, doc);
    }
}
