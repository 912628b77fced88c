// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S3/S4: a statement going down or dying forces everything above it to be
//! torn down tail-first before forward progress resumes.

use crate::support::*;

#[test]
fn down_in_the_middle_tears_down_the_tail_and_resumes() {
    let mut rig = rig(
        &["a", "b", "c"],
        |h| {
            h["a"].auto_up().auto_die();
            h["b"].auto_up().auto_die();
            h["c"].auto_up().auto_die();
        },
        "process p { a(); b(); c(); }",
    );
    assert_eq!((rig.snapshot().ap, rig.snapshot().fp), (3, 3));

    // b goes down: c must die; b itself stays alive.
    rig.handle("b").instance(0).emit_down();
    rig.settle();

    assert_eq!(rig.handle("c").instance(0).die_calls(), 1);
    assert_eq!(rig.handle("b").instance(0).die_calls(), 0);
    assert_eq!(rig.handle("a").instance(0).die_calls(), 0);
    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (2, 2));
    rig.assert_states(&[Adult, Child, Forgotten]);

    // b comes back up: c restarts with a fresh instance.
    rig.handle("b").instance(0).emit_up();
    rig.settle();
    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (3, 3));
    rig.assert_states(&[Adult, Adult, Adult]);
    assert_eq!(rig.handle("c").created(), 2);
    assert_eq!(rig.handle("b").created(), 1);
}

#[test]
fn dying_in_the_middle_kills_dependents_before_it_finishes() {
    let mut rig = rig(
        &["a", "b", "c"],
        |h| {
            h["a"].auto_up().auto_die();
            h["b"].auto_up(); // b's death is driven by the test
            h["c"].auto_up().auto_die();
        },
        "process p { a(); b(); c(); }",
    );

    // b announces it is dying on its own.
    rig.handle("b").instance(0).emit_dying();
    rig.settle();

    // c was ordered to die (and finished); b was never ordered — it is
    // already dying. The die requests went to c before b's death completed.
    assert_eq!(rig.handle("c").instance(0).die_calls(), 1);
    assert_eq!(rig.handle("b").instance(0).die_calls(), 0);
    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (1, 2));
    rig.assert_states(&[Adult, Dying, Forgotten]);

    // b's death completes: the stack rebuilds b then c.
    rig.handle("b").instance(0).emit_died(false);
    rig.settle();
    let s = rig.snapshot();
    assert_eq!((s.ap, s.fp), (3, 3));
    rig.assert_states(&[Adult, Adult, Adult]);
    assert_eq!(rig.handle("b").created(), 2);
    assert_eq!(rig.handle("c").created(), 2);
}

#[test]
fn teardown_order_is_reverse_of_buildup() {
    let mut rig = rig(
        &["a", "b", "c", "d"],
        |h| {
            for ty in ["a", "b", "c", "d"] {
                h[ty].auto_up();
            }
        },
        "process p { a(); b(); c(); d(); }",
    );
    assert_eq!((rig.snapshot().ap, rig.snapshot().fp), (4, 4));

    // a dies spontaneously: everything above unwinds tail-first, one died
    // at a time (manual death keeps the ordering observable).
    rig.handle("a").instance(0).emit_dying();
    rig.settle();
    assert_eq!(rig.handle("d").instance(0).die_calls(), 1);
    assert_eq!(rig.handle("c").instance(0).die_calls(), 0);
    rig.assert_states(&[Dying, Adult, Adult, Dying]);

    rig.handle("d").instance(0).emit_dying();
    rig.handle("d").instance(0).emit_died(false);
    rig.settle();
    assert_eq!(rig.handle("c").instance(0).die_calls(), 1);
    assert_eq!(rig.handle("b").instance(0).die_calls(), 0);
    rig.assert_states(&[Dying, Adult, Dying, Forgotten]);

    rig.handle("c").instance(0).emit_died(false);
    rig.settle();
    assert_eq!(rig.handle("b").instance(0).die_calls(), 1);
    rig.assert_states(&[Dying, Dying, Forgotten, Forgotten]);

    rig.handle("b").instance(0).emit_died(false);
    rig.settle();
    rig.assert_states(&[Dying, Forgotten, Forgotten, Forgotten]);

    // Once a's own death completes, the whole stack rebuilds in order.
    rig.handle("a").instance(0).emit_died(false);
    rig.settle();
    assert_eq!((rig.snapshot().ap, rig.snapshot().fp), (4, 4));
    rig.assert_states(&[Adult, Adult, Adult, Adult]);
}
