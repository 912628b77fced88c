// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable module for engine tests.
//!
//! A [`FakeModule`] records every instance it creates and lets tests drive
//! the instance lifecycle (up/down/dying/died) by hand through the
//! recorded emitters, script init failures, and inspect die and get-var
//! calls.

use crate::error::ModuleError;
use crate::instance::{EventEmitter, InstanceCtx, Module, ModuleInstance};
use netup_core::Value;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct ModuleState {
    /// Number of upcoming `create` calls that fail.
    init_failures: usize,
    /// Emit up immediately on create.
    auto_up: bool,
    /// `die()` completes on its own with dying + clean died.
    auto_die: bool,
    /// Exported variables served by every instance's `get_var`.
    vars: HashMap<String, Value>,
    instances: Vec<Arc<Mutex<InstanceRec>>>,
}

struct InstanceRec {
    args: Vec<Value>,
    alias: Option<String>,
    log_prefix: String,
    emitter: EventEmitter,
    die_calls: usize,
    get_var_calls: Vec<String>,
}

/// A module whose instances are driven by the test through a [`FakeHandle`].
pub struct FakeModule {
    ty: &'static str,
    state: Arc<Mutex<ModuleState>>,
}

impl FakeModule {
    pub fn new(ty: &'static str) -> (Arc<Self>, FakeHandle) {
        let state = Arc::new(Mutex::new(ModuleState::default()));
        (Arc::new(Self { ty, state: state.clone() }), FakeHandle { state })
    }
}

impl Module for FakeModule {
    fn ty(&self) -> &'static str {
        self.ty
    }

    fn create(&self, ctx: InstanceCtx) -> Result<Box<dyn ModuleInstance>, ModuleError> {
        let mut state = self.state.lock();
        if state.init_failures > 0 {
            state.init_failures -= 1;
            return Err(ModuleError::Init("scripted failure".into()));
        }
        if state.auto_up {
            ctx.emitter.up();
        }
        let rec = Arc::new(Mutex::new(InstanceRec {
            args: ctx.args,
            alias: ctx.alias,
            log_prefix: ctx.log_prefix,
            emitter: ctx.emitter,
            die_calls: 0,
            get_var_calls: Vec::new(),
        }));
        state.instances.push(rec.clone());
        Ok(Box::new(FakeInstance { module: self.state.clone(), rec }))
    }
}

struct FakeInstance {
    module: Arc<Mutex<ModuleState>>,
    rec: Arc<Mutex<InstanceRec>>,
}

impl ModuleInstance for FakeInstance {
    fn die(&mut self) {
        let emitter = {
            let mut rec = self.rec.lock();
            rec.die_calls += 1;
            rec.emitter.clone()
        };
        if self.module.lock().auto_die {
            emitter.dying();
            emitter.died(false);
        }
    }

    fn get_var(&self, name: &str) -> Option<Value> {
        self.rec.lock().get_var_calls.push(name.to_string());
        self.module.lock().vars.get(name).cloned()
    }
}

/// Test-side control of a [`FakeModule`].
#[derive(Clone)]
pub struct FakeHandle {
    state: Arc<Mutex<ModuleState>>,
}

impl FakeHandle {
    /// Make the next `n` create calls fail.
    pub fn fail_inits(&self, n: usize) {
        self.state.lock().init_failures = n;
    }

    /// Emit up immediately when an instance is created.
    pub fn auto_up(&self) -> &Self {
        self.state.lock().auto_up = true;
        self
    }

    /// Complete `die()` on its own with dying + clean died.
    pub fn auto_die(&self) -> &Self {
        self.state.lock().auto_die = true;
        self
    }

    /// Serve `name` from every instance's `get_var`.
    pub fn set_var(&self, name: &str, value: Value) {
        self.state.lock().vars.insert(name.to_string(), value);
    }

    /// How many instances have been created.
    pub fn created(&self) -> usize {
        self.state.lock().instances.len()
    }

    /// Handle on the `i`-th created instance.
    ///
    /// # Panics
    /// Panics if fewer than `i + 1` instances exist.
    #[allow(clippy::panic)]
    pub fn instance(&self, i: usize) -> FakeInstanceHandle {
        let state = self.state.lock();
        match state.instances.get(i) {
            Some(rec) => FakeInstanceHandle { rec: rec.clone() },
            None => panic!("no instance {} (created: {})", i, state.instances.len()),
        }
    }

    /// Handle on the most recently created instance.
    ///
    /// # Panics
    /// Panics if no instance has been created.
    pub fn last(&self) -> FakeInstanceHandle {
        self.instance(self.created().saturating_sub(1))
    }
}

/// Test-side control of one created instance.
pub struct FakeInstanceHandle {
    rec: Arc<Mutex<InstanceRec>>,
}

impl FakeInstanceHandle {
    pub fn emit_up(&self) {
        self.rec.lock().emitter.up();
    }

    pub fn emit_down(&self) {
        self.rec.lock().emitter.down();
    }

    pub fn emit_dying(&self) {
        self.rec.lock().emitter.dying();
    }

    pub fn emit_died(&self, is_error: bool) {
        self.rec.lock().emitter.died(is_error);
    }

    pub fn args(&self) -> Vec<Value> {
        self.rec.lock().args.clone()
    }

    pub fn alias(&self) -> Option<String> {
        self.rec.lock().alias.clone()
    }

    pub fn log_prefix(&self) -> String {
        self.rec.lock().log_prefix.clone()
    }

    pub fn die_calls(&self) -> usize {
        self.rec.lock().die_calls
    }

    pub fn get_var_calls(&self) -> Vec<String> {
        self.rec.lock().get_var_calls.clone()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
