// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S5: variable references resolve against earlier statements' instances
//! at advance time.

use crate::support::*;
use netup_core::Value;
use netup_engine::DEFAULT_RETRY_TIME;

#[test]
fn variable_reference_is_resolved_once_at_advance() {
    let rig = rig(
        &["mod1", "mod2"],
        |h| {
            h["mod1"].auto_up();
            h["mod2"].auto_up();
            h["mod1"].set_var("x", Value::str("v"));
        },
        "process p { mod1() a; mod2(a.x); }",
    );

    // Exactly one get_var("x") on a's instance, and b's materialized
    // argument list is ["v"].
    assert_eq!(rig.handle("mod1").instance(0).get_var_calls(), vec!["x".to_string()]);
    assert_eq!(rig.handle("mod2").instance(0).args(), vec![Value::str("v")]);
    assert_eq!((rig.snapshot().ap, rig.snapshot().fp), (2, 2));
}

#[test]
fn bare_reference_resolves_the_empty_variable_name() {
    let rig = rig(
        &["mod1", "mod2"],
        |h| {
            h["mod1"].auto_up();
            h["mod2"].auto_up();
            h["mod1"].set_var("", Value::str("whole"));
        },
        "process p { mod1() a; mod2(a); }",
    );

    assert_eq!(rig.handle("mod1").instance(0).get_var_calls(), vec![String::new()]);
    assert_eq!(rig.handle("mod2").instance(0).args(), vec![Value::str("whole")]);
}

#[test]
fn duplicate_aliases_resolve_to_the_nearest_earlier_statement() {
    let rig = rig(
        &["one", "two", "sink"],
        |h| {
            h["one"].auto_up();
            h["two"].auto_up();
            h["sink"].auto_up();
            h["one"].set_var("v", Value::str("first"));
            h["two"].set_var("v", Value::str("second"));
        },
        "process p { one() x; two() x; sink(x.v); }",
    );

    assert_eq!(rig.handle("sink").instance(0).args(), vec![Value::str("second")]);
    assert!(rig.handle("one").instance(0).get_var_calls().is_empty());
}

#[test]
fn mixed_literals_and_references_keep_argument_order() {
    let rig = rig(
        &["src", "sink"],
        |h| {
            h["src"].auto_up();
            h["sink"].auto_up();
            h["src"].set_var("addr", Value::str("10.0.0.2"));
        },
        r#"process p { src() s; sink("dev", s.addr, "up"); }"#,
    );

    assert_eq!(
        rig.handle("sink").instance(0).args(),
        vec![Value::str("dev"), Value::str("10.0.0.2"), Value::str("up")]
    );
}

#[test]
fn unresolved_variable_is_retried_and_can_recover() {
    let mut rig = rig(
        &["src", "sink"],
        |h| {
            h["src"].auto_up();
            h["sink"].auto_up();
        },
        "process p { src() s; sink(s.addr); }",
    );

    // get_var declined: sink never started, retry armed.
    assert_eq!(rig.handle("sink").created(), 0);
    assert!(rig.snapshot().retry_armed);

    // The variable appears (the world changed); the retry succeeds.
    rig.handle("src").set_var("addr", Value::str("10.0.0.9"));
    rig.elapse(DEFAULT_RETRY_TIME);
    assert_eq!(rig.handle("sink").created(), 1);
    assert_eq!(rig.handle("sink").instance(0).args(), vec![Value::str("10.0.0.9")]);
}
