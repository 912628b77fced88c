// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn string_accessors() {
    let v = Value::str("eth0");
    assert_eq!(v.as_str(), Some("eth0"));
    assert_eq!(v.as_list(), None);
    assert_eq!(v.type_name(), "string");
}

#[test]
fn list_accessors() {
    let v = Value::list(vec![Value::str("a"), Value::str("b")]);
    assert_eq!(v.as_str(), None);
    assert_eq!(v.as_list().map(<[Value]>::len), Some(2));
    assert_eq!(v.type_name(), "list");
}

#[test]
fn clone_is_deep() {
    let original = Value::list(vec![Value::str("a"), Value::list(vec![Value::str("b")])]);
    let copy = original.clone();
    assert_eq!(original, copy);
    // Mutating the copy must not be observable through the original.
    let mut copy = copy;
    if let Value::List(items) = &mut copy {
        items.push(Value::str("c"));
    }
    assert_ne!(original, copy);
}

#[test]
fn display_renders_nested() {
    let v = Value::list(vec![Value::str("a"), Value::list(vec![Value::str("b")])]);
    assert_eq!(v.to_string(), "{\"a\", {\"b\"}}");
}

#[test]
fn serializes_untagged() {
    let v = Value::list(vec![Value::str("a"), Value::str("b")]);
    assert_eq!(serde_json::to_string(&v).unwrap(), r#"["a","b"]"#);

    let back: Value = serde_json::from_str(r#"["a",["b"]]"#).unwrap();
    assert_eq!(back, Value::list(vec![Value::str("a"), Value::list(vec![Value::str("b")])]));
}
