// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S6: shutdown mid-build tears down in reverse, destroys the process, and
//! stops the loop once nothing is left.

use crate::support::*;
use netup_core::Event;

#[test]
fn shutdown_mid_build_unwinds_and_quits() {
    let mut rig = rig(
        &["a", "b"],
        |h| {
            h["a"].auto_up().auto_die();
            h["b"].auto_die(); // b never reports up: still a child
        },
        "process p { a(); b(); }",
    );
    rig.assert_states(&[Adult, Child]);

    rig.sup.dispatch(Event::ShutdownRequested);
    rig.settle();

    // b was asked to die first, then a; the process is gone and the
    // supervisor is finished.
    assert_eq!(rig.handle("b").instance(0).die_calls(), 1);
    assert_eq!(rig.handle("a").instance(0).die_calls(), 1);
    assert_eq!(rig.sup.process_count(), 0);
    assert!(rig.sup.is_finished());
}

#[test]
fn repeated_shutdown_requests_change_nothing() {
    let mut rig = rig(
        &["a"],
        |h| {
            h["a"].auto_up();
        },
        "process p { a(); }",
    );

    rig.sup.dispatch(Event::ShutdownRequested);
    rig.sup.dispatch(Event::ShutdownRequested);
    rig.sup.dispatch(Event::ShutdownRequested);
    rig.settle();

    assert_eq!(rig.handle("a").instance(0).die_calls(), 1);
    rig.assert_states(&[Dying]);

    rig.handle("a").instance(0).emit_died(false);
    rig.settle();
    assert!(rig.sup.is_finished());
}

#[test]
fn shutdown_with_multiple_processes_quits_after_the_last_one() {
    let mut rig = rig(
        &["a"],
        |h| {
            h["a"].auto_up();
        },
        "process p { a(); } process q { a(); }",
    );

    rig.sup.dispatch(Event::ShutdownRequested);
    rig.settle();
    assert_eq!(rig.sup.process_count(), 2);
    assert!(!rig.sup.is_finished());

    rig.handle("a").instance(0).emit_died(false);
    rig.settle();
    assert_eq!(rig.sup.process_count(), 1);
    assert!(!rig.sup.is_finished());

    rig.handle("a").instance(1).emit_died(false);
    rig.settle();
    assert_eq!(rig.sup.process_count(), 0);
    assert!(rig.sup.is_finished());
}

/// The async loop itself: processes come up, a shutdown event arrives, the
/// loop drains the teardown and returns.
#[tokio::test]
async fn run_loop_exits_after_shutdown() {
    use netup_config::parse_document;
    use netup_engine::{EngineConfig, Supervisor};
    use netup_modules::fake::FakeModule;
    use netup_modules::ModuleRegistry;
    use std::sync::Arc;

    let (module, handle) = FakeModule::new("a");
    handle.auto_up().auto_die();
    let mut registry = ModuleRegistry::new();
    registry.register(module);

    let mut sup =
        Supervisor::new(Arc::new(registry), netup_core::SystemClock, EngineConfig::default());
    let doc = parse_document("process p { a(); a(); }").unwrap();
    sup.add_process(&doc.processes[0]).unwrap();

    let tx = sup.event_sender();
    tx.send(Event::ShutdownRequested).unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(5), sup.run()).await.unwrap();
    assert!(sup.is_finished());
    assert_eq!(sup.process_count(), 0);
}
