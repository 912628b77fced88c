// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S1: all statements come up in order and the process reaches victory.

use crate::support::*;

#[test]
fn three_statements_reach_victory_in_order() {
    let rig = rig(
        &["a", "b", "c"],
        |h| {
            h["a"].auto_up();
            h["b"].auto_up();
            h["c"].auto_up();
        },
        "process p { a(); b(); c(); }",
    );

    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (3, 3));
    rig.assert_states(&[Adult, Adult, Adult]);
    assert!(!s.retry_armed);

    // Exactly one instance of each, created strictly in order: a statement
    // only initializes once its predecessor is up.
    assert_eq!(rig.handle("a").created(), 1);
    assert_eq!(rig.handle("b").created(), 1);
    assert_eq!(rig.handle("c").created(), 1);
}

#[test]
fn statements_do_not_start_before_their_predecessor_is_up() {
    let mut rig = rig(
        &["a", "b"],
        |_| {}, // manual: nothing comes up on its own
        "process p { a(); b(); }",
    );

    assert_eq!(rig.handle("a").created(), 1);
    assert_eq!(rig.handle("b").created(), 0);
    rig.assert_states(&[Child, Forgotten]);

    rig.handle("a").instance(0).emit_up();
    rig.settle();
    assert_eq!(rig.handle("b").created(), 1);
    rig.assert_states(&[Adult, Child]);
}

#[test]
fn empty_process_is_victory_in_one_step() {
    let rig = rig(&[], |_| {}, "process p { }");
    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (0, 0));
    assert!(s.states.is_empty());
}

#[test]
fn literal_arguments_are_materialized_for_the_instance() {
    let rig = rig(&["a"], |h| { h["a"].auto_up(); }, r#"process p { a("eth0", "up"); }"#);
    assert_eq!(
        rig.handle("a").instance(0).args(),
        vec![netup_core::Value::str("eth0"), netup_core::Value::str("up")]
    );
}
