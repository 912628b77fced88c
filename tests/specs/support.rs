// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the scenario specs.

use netup_config::parse_document;
use netup_core::FakeClock;
use netup_engine::{EngineConfig, ProcessSnapshot, SlotState, Supervisor};
use netup_modules::fake::{FakeHandle, FakeModule};
use netup_modules::ModuleRegistry;
use std::collections::HashMap;
use std::sync::Arc;

/// A supervisor wired to fake modules and a fake clock, driven by hand.
pub struct Rig {
    pub sup: Supervisor<FakeClock>,
    pub clock: FakeClock,
    handles: HashMap<&'static str, FakeHandle>,
}

/// Register one fake module per type name, configure them, then start the
/// supervisor on the given configuration.
pub fn rig(types: &[&'static str], configure: impl Fn(&HashMap<&'static str, FakeHandle>), config: &str) -> Rig {
    let mut registry = ModuleRegistry::new();
    let mut handles = HashMap::new();
    for ty in types {
        let (module, handle) = FakeModule::new(ty);
        registry.register(module);
        handles.insert(*ty, handle);
    }
    configure(&handles);

    let clock = FakeClock::new();
    let mut sup = Supervisor::new(Arc::new(registry), clock.clone(), EngineConfig::default());
    let doc = parse_document(config).unwrap();
    for decl in &doc.processes {
        sup.add_process(decl).unwrap();
    }
    let mut rig = Rig { sup, clock, handles };
    rig.settle();
    rig
}

impl Rig {
    pub fn handle(&self, ty: &str) -> &FakeHandle {
        &self.handles[ty]
    }

    /// Dispatch queued events until nothing is left.
    pub fn settle(&mut self) {
        self.sup.pump();
    }

    /// Advance the fake clock and fire due timers.
    pub fn elapse(&mut self, duration: std::time::Duration) {
        self.clock.advance(duration);
        self.sup.poll_timers();
        self.settle();
    }

    pub fn snapshot(&self) -> ProcessSnapshot {
        self.sup.snapshot().into_iter().next().expect("one process")
    }

    pub fn assert_states(&self, expected: &[SlotState]) {
        assert_eq!(self.snapshot().states, expected);
    }
}

/// Shorthand for slot state lists.
pub use netup_engine::SlotState::{Adult, Child, Dying, Forgotten};
