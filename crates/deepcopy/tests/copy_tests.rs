//! End-to-end tests for deep copy: sharing, cycles, independence, failures

use deepcopy::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════

/// `Node { value: i64, next: &Node, secret: String (private) }`
fn node_type() -> RecordType {
    let node = RecordType::declare("Node");
    node.define(vec![
        FieldDef::public("value", Type::I64),
        FieldDef::public("next", Type::reference(Type::Record(node.clone()))),
        FieldDef::private("secret", Type::String),
    ]);
    node
}

fn new_node(ty: &RecordType, value: i64) -> Pointer {
    Pointer::new(Value::Record(
        RecordValue::new(ty.clone()).with_field("value", Value::I64(value)),
    ))
}

fn set_field(ptr: &Pointer, name: &str, value: Value) {
    ptr.update(|v| match v {
        Value::Record(r) => assert!(r.set(name, value)),
        other => panic!("expected record, got {:?}", other),
    })
    .expect("non-nil pointer");
}

fn field(ptr: &Pointer, name: &str) -> Value {
    ptr.load()
        .and_then(|v| v.as_record().and_then(|r| r.get(name).cloned()))
        .expect("record field")
}

fn pointer(value: &Value) -> &Pointer {
    value.as_pointer().expect("reference value")
}

// ═══════════════════════════════════════════════════════════════════════
// Independence
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_slice_copy_is_independent() -> anyhow::Result<()> {
    let original = SliceValue::new(Type::I64, vec![Value::I64(1), Value::I64(2)]);
    let copy = deep_copy(&Value::Slice(original.clone()))?;
    let copy = copy.as_slice().expect("slice");

    original.set(0, Value::I64(100));
    assert_eq!(copy.get(0), Some(Value::I64(1)));

    copy.set(1, Value::I64(200));
    assert_eq!(original.get(1), Some(Value::I64(2)));
    Ok(())
}

#[test]
fn test_nested_references_are_independent() -> anyhow::Result<()> {
    let ty = node_type();
    let tail = new_node(&ty, 2);
    let head = new_node(&ty, 1);
    set_field(&head, "next", Value::Ref(tail.clone()));

    let copy = deep_copy(&Value::Ref(head.clone()))?;
    let copied_tail = field(pointer(&copy), "next");

    set_field(&tail, "value", Value::I64(99));
    assert_eq!(field(pointer(&copied_tail), "value"), Value::I64(2));
    assert!(!pointer(&copied_tail).ptr_eq(&tail));
    Ok(())
}

#[test]
fn test_strings_inside_records_get_new_storage() -> anyhow::Result<()> {
    let ty = RecordType::new("Named", vec![FieldDef::public("name", Type::String)]);
    let original = Value::Record(RecordValue::new(ty).with_field("name", Value::from("x")));
    let copy = deep_copy(&original)?;

    match (
        original.as_record().and_then(|r| r.get("name")),
        copy.as_record().and_then(|r| r.get("name")),
    ) {
        (Some(Value::String(a)), Some(Value::String(b))) => {
            assert_eq!(a, b);
            assert!(!std::sync::Arc::ptr_eq(a, b));
        }
        other => panic!("expected string fields, got {:?}", other),
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Sharing and Cycles
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_shared_pointer_in_slice_stays_shared() -> anyhow::Result<()> {
    let ty = node_type();
    let shared = new_node(&ty, 7);
    let other = new_node(&ty, 8);
    let original = Value::slice(
        Type::reference(Type::Record(ty)),
        vec![
            Value::Ref(shared.clone()),
            Value::Ref(other),
            Value::Ref(shared.clone()),
        ],
    );

    let copy = deep_copy(&original)?;
    let items = copy.as_slice().and_then(SliceValue::to_vec).expect("items");
    assert_eq!(items.len(), 3);

    let first = pointer(&items[0]);
    let middle = pointer(&items[1]);
    let last = pointer(&items[2]);
    assert!(first.ptr_eq(last));
    assert!(!first.ptr_eq(middle));
    assert!(!first.ptr_eq(&shared));

    set_field(first, "value", Value::I64(70));
    assert_eq!(field(last, "value"), Value::I64(70));
    assert_eq!(field(&shared, "value"), Value::I64(7));
    Ok(())
}

#[test]
fn test_self_reference_is_reproduced() -> anyhow::Result<()> {
    let ty = node_type();
    let node = new_node(&ty, 1);
    set_field(&node, "next", Value::Ref(node.clone()));

    let copy = deep_copy(&Value::Ref(node.clone()))?;
    let copy = pointer(&copy);
    let next = field(copy, "next");

    assert!(pointer(&next).ptr_eq(copy));
    assert!(!copy.ptr_eq(&node));
    assert_eq!(field(copy, "value"), Value::I64(1));
    Ok(())
}

#[test]
fn test_longer_cycle_is_reproduced() -> anyhow::Result<()> {
    let ty = node_type();
    let a = new_node(&ty, 1);
    let b = new_node(&ty, 2);
    let c = new_node(&ty, 3);
    set_field(&a, "next", Value::Ref(b.clone()));
    set_field(&b, "next", Value::Ref(c.clone()));
    set_field(&c, "next", Value::Ref(a.clone()));

    let copy = deep_copy(&Value::Ref(b.clone()))?;
    let b2 = pointer(&copy).clone();
    let c2 = pointer(&field(&b2, "next")).clone();
    let a2 = pointer(&field(&c2, "next")).clone();
    let back = field(&a2, "next");

    assert!(pointer(&back).ptr_eq(&b2));
    assert_eq!(field(&a2, "value"), Value::I64(1));
    assert_eq!(field(&c2, "value"), Value::I64(3));
    for (copied, original) in [(&a2, &a), (&b2, &b), (&c2, &c)] {
        assert!(!copied.ptr_eq(original));
    }
    Ok(())
}

#[test]
fn test_cycle_through_map_values() -> anyhow::Result<()> {
    let registry = Pointer::typed(Type::Any, Value::Empty);
    let map = MapValue::new(Type::String, Type::reference(Type::Any))
        .with_entry(Value::from("self"), Value::Ref(registry.clone()))?;
    registry.replace(Value::Map(map));

    let copy = deep_copy(&Value::Ref(registry.clone()))?;
    let copy = pointer(&copy);
    let inner = copy.load().expect("referent");
    let entry = inner
        .as_map()
        .and_then(|m| m.get(&Value::from("self")))
        .expect("entry");
    assert!(pointer(&entry).ptr_eq(copy));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Absence and Visibility
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_nil_map_copies_to_nil_map() -> anyhow::Result<()> {
    let original = Value::nil_map(Type::String, Type::I64);
    let copy = deep_copy(&original)?;
    assert!(copy.is_nil());
    assert_eq!(copy.type_of(), Type::map(Type::String, Type::I64));
    assert_eq!(copy, original);
    Ok(())
}

#[test]
fn test_empty_containers_stay_present() -> anyhow::Result<()> {
    let slice = deep_copy(&Value::slice(Type::I64, vec![]))?;
    let map = deep_copy(&Value::Map(MapValue::new(Type::I64, Type::I64)))?;
    assert!(!slice.is_nil());
    assert!(!map.is_nil());
    Ok(())
}

#[test]
fn test_private_fields_are_zeroed_in_copy() -> anyhow::Result<()> {
    let ty = node_type();
    let node = new_node(&ty, 5);
    set_field(&node, "secret", Value::from("hunter2"));

    let copy = deep_copy(&Value::Ref(node))?;
    let copy = pointer(&copy);
    assert_eq!(field(copy, "value"), Value::I64(5));
    assert_eq!(field(copy, "secret"), Value::from(""));
    assert!(field(copy, "next").is_nil());
    Ok(())
}

#[test]
fn test_strict_copier_refuses_hidden_state() {
    let ty = node_type();
    let node = new_node(&ty, 5);
    set_field(&node, "secret", Value::from("hunter2"));

    let copier = DeepCopier::with_options(CopyOptions::strict());
    let err = copier.deep_copy(&Value::Ref(node)).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CopyError::UnexportedField { field, record } if field == "secret" && record == "Node"
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Unsupported Kinds
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_function_deep_inside_fails_with_full_path() {
    let handler = RecordType::new(
        "Handler",
        vec![
            FieldDef::public("name", Type::String),
            FieldDef::public("callbacks", Type::slice(Type::Function)),
        ],
    );
    let record = RecordValue::new(handler)
        .with_field("name", Value::from("on_click"))
        .with_field(
            "callbacks",
            Value::slice(
                Type::Function,
                vec![
                    Value::Function(FunctionValue::nil()),
                    Value::function("cb", |_| Ok(Value::Unit)),
                ],
            ),
        );
    let original = Value::slice(
        Type::reference(Type::Any),
        vec![Value::reference(Value::Record(record))],
    );

    let err = deep_copy(&original).unwrap_err();

    let CopyError::ElementCopyFailed { element, source, .. } = &err else {
        panic!("expected ElementCopyFailed, got {:?}", err);
    };
    assert_eq!(element, &Element::Index(0));
    let CopyError::FieldCopyFailed { field, record, source } = source.as_ref() else {
        panic!("expected FieldCopyFailed, got {:?}", source);
    };
    assert_eq!(field, "callbacks");
    assert_eq!(record, "Handler");
    let CopyError::ElementCopyFailed { element, .. } = source.as_ref() else {
        panic!("expected ElementCopyFailed, got {:?}", source);
    };
    assert_eq!(element, &Element::Index(0));
    assert!(matches!(
        err.root_cause(),
        CopyError::UnsupportedKind {
            kind: Kind::Function,
            ..
        }
    ));
}

#[test]
fn test_channel_in_map_fails() {
    let map = MapValue::new(Type::I64, Type::channel(Type::I64))
        .with_entry(Value::I64(1), Value::channel(Type::I64, 4))
        .expect("comparable key");
    let err = deep_copy(&Value::Map(map)).unwrap_err();
    assert!(matches!(
        err,
        CopyError::ElementCopyFailed {
            element: Element::Key(ref k),
            ..
        } if k == "1"
    ));
    assert!(matches!(
        err.root_cause(),
        CopyError::UnsupportedKind {
            kind: Kind::Channel,
            ..
        }
    ));
}

#[test]
fn test_uncopyable_map_key_fails_naming_key() {
    let handle = RecordType::new(
        "Handle",
        vec![
            FieldDef::public("id", Type::I64),
            FieldDef::public("close", Type::Function),
        ],
    );
    let key = Value::reference(Value::Record(
        RecordValue::new(handle.clone())
            .with_field("id", Value::I64(3))
            .with_field("close", Value::function("close", |_| Ok(Value::Unit))),
    ));
    let map = MapValue::new(Type::reference(Type::Record(handle)), Type::Bool)
        .with_entry(key, Value::Bool(true))
        .expect("reference keys are comparable");

    let err = deep_copy(&Value::Map(map)).unwrap_err();

    let CopyError::ElementCopyFailed {
        element: Element::Key(_),
        source,
        ..
    } = &err
    else {
        panic!("expected ElementCopyFailed on a key, got {:?}", err);
    };
    assert!(matches!(
        source.as_ref(),
        CopyError::FieldCopyFailed { field, record, .. } if field == "close" && record == "Handle"
    ));
    assert!(matches!(
        err.root_cause(),
        CopyError::UnsupportedKind {
            kind: Kind::Function,
            ..
        }
    ));
}

#[test]
fn test_unsupported_kind_message_names_type() {
    let err = deep_copy(&Value::RawPointer(0x10)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unable to deep copy value of type *raw: kind raw pointer is not supported"
    );
}

#[test]
#[should_panic(expected = "kind channel is not supported")]
fn test_deep_copy_or_panic_aborts() {
    deep_copy_or_panic(&Value::channel(Type::Unit, 0));
}

#[test]
fn test_deep_copy_or_panic_returns_copy() {
    let original = Value::array(Type::Char, vec![Value::Char('a'), Value::Char('b')]);
    assert_eq!(deep_copy_or_panic(&original), original);
}

// ═══════════════════════════════════════════════════════════════════════
// Copy Into Destination
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_copy_into_redirects_self_reference_to_destination() -> anyhow::Result<()> {
    let ty = node_type();
    let source = new_node(&ty, 1);
    set_field(&source, "next", Value::Ref(source.clone()));
    let destination = Pointer::new(Value::Record(RecordValue::new(ty)));

    copy_into(&Value::Ref(source.clone()), &Value::Ref(destination.clone()))?;

    assert_eq!(field(&destination, "value"), Value::I64(1));
    let next = field(&destination, "next");
    assert!(pointer(&next).ptr_eq(&destination));
    assert!(!pointer(&next).ptr_eq(&source));
    Ok(())
}

#[test]
fn test_copy_into_keeps_destination_private_fields() -> anyhow::Result<()> {
    let ty = node_type();
    let source = new_node(&ty, 1);
    set_field(&source, "secret", Value::from("source"));
    let destination = new_node(&ty, 0);
    set_field(&destination, "secret", Value::from("destination"));

    copy_into(&Value::Ref(source), &Value::Ref(destination.clone()))?;

    assert_eq!(field(&destination, "value"), Value::I64(1));
    assert_eq!(field(&destination, "secret"), Value::from("destination"));
    Ok(())
}

#[test]
fn test_copy_into_itself_does_not_deadlock() -> anyhow::Result<()> {
    let ty = node_type();
    let node = new_node(&ty, 4);
    set_field(&node, "next", Value::Ref(node.clone()));

    copy_into(&Value::Ref(node.clone()), &Value::Ref(node.clone()))?;

    assert_eq!(field(&node, "value"), Value::I64(4));
    assert!(pointer(&field(&node, "next")).ptr_eq(&node));
    Ok(())
}

fn precondition(source: &Value, destination: &Value) -> Precondition {
    match copy_into(source, destination) {
        Err(CopyError::InvalidArgument { reason, .. }) => reason,
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_copy_into_preconditions() {
    let ty = node_type();
    let node = Value::Ref(new_node(&ty, 1));
    let other_node = Value::Ref(new_node(&ty, 2));
    let nil_node = Value::nil_ref(Type::Record(ty));
    let number = Value::reference(Value::I64(1));
    let other_number = Value::reference(Value::I64(2));

    assert_eq!(precondition(&Value::I64(1), &node), Precondition::NotReference);
    assert_eq!(precondition(&node, &Value::Empty), Precondition::NotReference);
    assert_eq!(precondition(&nil_node, &node), Precondition::NilReference);
    assert_eq!(precondition(&node, &nil_node), Precondition::NilReference);
    assert_eq!(precondition(&node, &number), Precondition::TypeMismatch);
    assert_eq!(precondition(&number, &other_number), Precondition::NotRecord);

    assert!(copy_into(&node, &other_node).is_ok());
}

#[test]
fn test_copy_into_checks_what_destination_holds() {
    let ty = node_type();
    let source = Value::Ref(new_node(&ty, 1));

    let holds_number = Pointer::typed(Type::Record(ty.clone()), Value::I64(0));
    assert_eq!(
        precondition(&source, &Value::Ref(holds_number.clone())),
        Precondition::NotRecord
    );
    assert_eq!(holds_number.load(), Some(Value::I64(0)));

    let other = RecordType::new("Other", vec![FieldDef::public("value", Type::String)]);
    let holds_other = Pointer::typed(
        Type::Record(ty),
        Value::Record(RecordValue::new(other).with_field("value", Value::from("kept"))),
    );
    assert_eq!(
        precondition(&source, &Value::Ref(holds_other.clone())),
        Precondition::TypeMismatch
    );
    assert_eq!(field(&holds_other, "value"), Value::from("kept"));
}

#[test]
fn test_copy_into_failure_leaves_destination_untouched() {
    let job = RecordType::new(
        "Job",
        vec![
            FieldDef::public("id", Type::I64),
            FieldDef::public("run", Type::Function),
        ],
    );
    let source = Pointer::new(Value::Record(
        RecordValue::new(job.clone())
            .with_field("id", Value::I64(1))
            .with_field("run", Value::function("run", |_| Ok(Value::Unit))),
    ));
    let destination = Pointer::new(Value::Record(
        RecordValue::new(job).with_field("id", Value::I64(9)),
    ));

    let err = copy_into(&Value::Ref(source), &Value::Ref(destination.clone())).unwrap_err();
    assert!(matches!(err, CopyError::FieldCopyFailed { ref field, .. } if field == "run"));
    assert_eq!(field(&destination, "id"), Value::I64(9));
}

// ═══════════════════════════════════════════════════════════════════════
// Concurrency
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_values_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Value>();
    assert_send_sync::<CopyError>();
    assert_send_sync::<DeepCopier>();
}

#[test]
fn test_concurrent_copies_of_shared_cycle() {
    let ty = node_type();
    let node = new_node(&ty, 11);
    set_field(&node, "next", Value::Ref(node.clone()));
    let original = Value::Ref(node);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let original = original.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let copy = deep_copy(&original).expect("copyable cycle");
                    let copy = pointer(&copy);
                    assert!(pointer(&field(copy, "next")).ptr_eq(copy));
                    assert!(!copy.ptr_eq(pointer(&original)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("copy thread panicked");
    }
}
