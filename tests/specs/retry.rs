// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S2: transient init failure retries after the backoff and then proceeds.

use crate::support::*;
use netup_engine::DEFAULT_RETRY_TIME;
use std::time::Duration;

#[test]
fn transient_failure_on_middle_statement_retries_then_completes() {
    let mut rig = rig(
        &["a", "b", "c"],
        |h| {
            h["a"].auto_up();
            h["b"].auto_up();
            h["c"].auto_up();
            h["b"].fail_inits(1);
        },
        "process p { a(); b(); c(); }",
    );

    // a is up; b's init failed; the process holds position with the retry
    // timer armed and c untouched.
    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (1, 1));
    assert!(s.retry_armed);
    rig.assert_states(&[Adult, Forgotten, Forgotten]);
    assert_eq!(rig.handle("b").created(), 0);
    assert_eq!(rig.handle("c").created(), 0);

    // Strictly before the deadline nothing happens.
    rig.elapse(DEFAULT_RETRY_TIME - Duration::from_millis(1));
    assert_eq!(rig.handle("b").created(), 0);

    // At the deadline b is retried and the stack completes.
    rig.elapse(Duration::from_millis(1));
    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (3, 3));
    rig.assert_states(&[Adult, Adult, Adult]);
    assert_eq!(rig.handle("b").created(), 1);
    assert_eq!(rig.handle("c").created(), 1);
}

#[test]
fn continuous_failure_retries_at_full_intervals() {
    let mut rig = rig(
        &["a"],
        |h| {
            h["a"].fail_inits(5);
        },
        "process p { a(); }",
    );

    // Each cycle consumes exactly one init attempt, never early.
    for _ in 0..5 {
        assert!(rig.snapshot().retry_armed);
        rig.elapse(DEFAULT_RETRY_TIME / 2);
        rig.elapse(DEFAULT_RETRY_TIME / 2);
    }
    assert_eq!(rig.handle("a").created(), 1);
    rig.assert_states(&[Child]);
}
