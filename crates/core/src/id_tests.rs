// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn generated_ids_carry_prefix() {
    let id = InstanceId::new();
    assert!(id.as_str().starts_with(InstanceId::PREFIX));
    assert_eq!(id.suffix().len(), 12);
}

#[test]
fn generated_ids_are_unique() {
    let a = InstanceId::new();
    let b = InstanceId::new();
    assert_ne!(a, b);
}

#[test]
fn from_string_round_trips() {
    let id = InstanceId::from_string("ins-abc");
    assert_eq!(id, "ins-abc");
    assert_eq!(id.suffix(), "abc");
}

#[test]
fn suffix_of_unprefixed_string_is_identity() {
    let id = InstanceId::from_string("bare");
    assert_eq!(id.suffix(), "bare");
}

#[test]
fn serde_is_transparent() {
    let id = InstanceId::from_string("ins-abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"ins-abc\"");
}
