// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process statement state machine.
//!
//! A process owns an ordered array of statement slots and two cursors:
//! `ap` counts the leading statements committed to stay up, `fp` counts the
//! leading statements that still have a live module instance
//! (`0 <= ap <= fp <= len`). Forward progress starts the statement at `ap`;
//! whenever a statement below `ap` goes down or dies, `ap` is clamped and
//! the region `[ap, fp)` is torn down tail-first before the process may
//! advance again. Teardown order is therefore always the reverse of
//! construction order.
//!
//! Every entry point runs to completion synchronously; the machine yields
//! only by returning to the supervisor loop, which delivers instance
//! events, timer firings, and shutdown.

use crate::error::{ConfigError, StatementError};
use crate::statement::{Arg, StatementTemplate};
use crate::supervisor::{EngineCx, StmtAddr};
use netup_config::ProcessDecl;
use netup_core::{Clock, InstanceId, TimerId, Value};
use netup_modules::{EventEmitter, InstanceCtx, ModuleInstance, ModuleRegistry};
use std::time::Instant;

/// Lifecycle state of one statement slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No instance exists.
    Forgotten,
    /// Instance exists but has not reported up.
    Child,
    /// Instance is up; dependents above may rely on it.
    Adult,
    /// Instance is terminating; a died signal will follow.
    Dying,
}

netup_core::simple_display! {
    SlotState {
        Forgotten => "forgotten",
        Child => "child",
        Adult => "adult",
        Dying => "dying",
    }
}

/// Non-died instance events, routed by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InstanceEvent {
    Up,
    Down,
    Dying,
}

pub(crate) struct Slot {
    template: StatementTemplate,
    state: SlotState,
    /// Retry deadline; present exactly while the slot is in its error state.
    error_until: Option<Instant>,
    instance: Option<Box<dyn ModuleInstance>>,
    instance_id: Option<InstanceId>,
}

pub(crate) struct Process {
    key: usize,
    name: String,
    slots: Vec<Slot>,
    /// Advance pointer: leading statements committed to be up.
    ap: usize,
    /// Forward pointer: leading statements with a live instance.
    fp: usize,
}

impl Process {
    /// Compile a parsed process declaration. No statement is started yet.
    pub(crate) fn new(
        key: usize,
        decl: &ProcessDecl,
        registry: &ModuleRegistry,
    ) -> Result<Self, ConfigError> {
        let mut slots = Vec::with_capacity(decl.statements.len());
        for stmt in &decl.statements {
            slots.push(Slot {
                template: StatementTemplate::compile(stmt, registry)?,
                state: SlotState::Forgotten,
                error_until: None,
                instance: None,
                instance_id: None,
            });
        }
        Ok(Self { key, name: decl.name.clone(), slots, ap: 0, fp: 0 })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn ap(&self) -> usize {
        self.ap
    }

    pub(crate) fn fp(&self) -> usize {
        self.fp
    }

    pub(crate) fn states(&self) -> Vec<SlotState> {
        self.slots.iter().map(|s| s.state).collect()
    }

    /// Re-evaluate the process. Returns true when the process has finished
    /// retreating and must be destroyed by the supervisor.
    pub(crate) fn work<C: Clock>(&mut self, cx: &mut EngineCx<C>) -> bool {
        self.assert_pointers();

        // Disarm the retry timer in case we were waiting.
        cx.scheduler.cancel_timer(&TimerId::retry(self.key));

        if cx.terminating {
            return self.retreat();
        }
        self.fight(cx);
        false
    }

    /// Forward drive: tear down anything above `ap`, else advance.
    fn fight<C: Clock>(&mut self, cx: &mut EngineCx<C>) {
        if self.ap == self.fp {
            let waiting_for_up = self.ap > 0 && self.slots[self.ap - 1].state == SlotState::Child;
            if !waiting_for_up {
                self.advance(cx);
            }
            return;
        }

        // Order the last living statement to die, if not already dying.
        let i = self.fp - 1;
        if self.slots[i].state != SlotState::Dying {
            tracing::info!(process = %self.name, statement = i, "killing");
            self.order_die(i);
        }
        self.assert_pointers();
    }

    /// Start the statement at `ap`.
    fn advance<C: Clock>(&mut self, cx: &mut EngineCx<C>) {
        debug_assert_eq!(self.ap, self.fp);
        debug_assert!(self.ap == 0 || self.slots[self.ap - 1].state == SlotState::Adult);

        if self.ap == self.slots.len() {
            tracing::info!(process = %self.name, "victory");
            self.assert_pointers();
            return;
        }

        let i = self.ap;
        if let Some(until) = self.slots[i].error_until {
            if until > cx.clock.now() {
                self.wait(cx);
                return;
            }
            self.slots[i].error_until = None;
        }

        tracing::info!(process = %self.name, statement = i, "initializing");
        match self.start_statement(cx, i) {
            Ok(()) => {
                self.ap += 1;
                self.fp += 1;
                self.assert_pointers();
            }
            Err(e) => {
                tracing::error!(process = %self.name, statement = i, "{}", e);
                self.set_error(cx, i);
                self.wait(cx);
            }
        }
    }

    /// Materialize arguments and create the module instance for slot `i`.
    fn start_statement<C: Clock>(
        &mut self,
        cx: &mut EngineCx<C>,
        i: usize,
    ) -> Result<(), StatementError> {
        let args = self.materialize_args(i)?;

        let instance_id = InstanceId::new();
        let emitter = EventEmitter::new(instance_id.clone(), cx.tx.clone());
        let ctx = InstanceCtx {
            alias: self.slots[i].template.alias.clone(),
            args,
            log_prefix: format!("process {}: statement {}: module: ", self.name, i),
            emitter,
        };
        let module = self.slots[i].template.module.clone();
        let instance = module.create(ctx)?;

        let slot = &mut self.slots[i];
        slot.instance = Some(instance);
        slot.instance_id = Some(instance_id.clone());
        slot.state = SlotState::Child;
        cx.instances.insert(instance_id, StmtAddr { process: self.key, slot: i });
        Ok(())
    }

    /// Build the instance argument list for slot `i`, resolving variable
    /// references against the nearest earlier statement exporting the name.
    /// Partial results are dropped on any failure.
    fn materialize_args(&self, i: usize) -> Result<Vec<Value>, StatementError> {
        let mut values = Vec::with_capacity(self.slots[i].template.args.len());
        for arg in &self.slots[i].template.args {
            match arg {
                Arg::Literal(value) => values.push(value.clone()),
                Arg::Var { modname, varname } => {
                    let referred = self.slots[..i]
                        .iter()
                        .rev()
                        .find(|s| s.template.alias() == Some(modname.as_str()));
                    let Some(referred) = referred else {
                        return Err(StatementError::UnresolvedName {
                            modname: modname.clone(),
                            varname: varname.clone(),
                        });
                    };
                    debug_assert_eq!(referred.state, SlotState::Adult);
                    let value = referred
                        .instance
                        .as_ref()
                        .and_then(|instance| instance.get_var(varname));
                    let Some(value) = value else {
                        return Err(StatementError::UnresolvedVariable {
                            modname: modname.clone(),
                            varname: varname.clone(),
                        });
                    };
                    values.push(value);
                }
            }
        }
        Ok(values)
    }

    /// Hold position until the retry deadline of the statement at `ap`.
    fn wait<C: Clock>(&mut self, cx: &mut EngineCx<C>) {
        debug_assert_eq!(self.ap, self.fp);
        debug_assert!(self.ap < self.slots.len());
        let Some(deadline) = self.slots[self.ap].error_until else {
            debug_assert!(false, "wait without a pending error");
            return;
        };
        tracing::info!(process = %self.name, statement = self.ap, "waiting after error");
        cx.scheduler.set_timer_at(TimerId::retry(self.key), deadline);
        self.assert_pointers();
    }

    /// The retry timer fired: clear the error and try again.
    pub(crate) fn handle_retry_timer<C: Clock>(&mut self, cx: &mut EngineCx<C>) {
        if cx.terminating
            || self.ap != self.fp
            || self.ap >= self.slots.len()
            || self.slots[self.ap].error_until.is_none()
        {
            tracing::debug!(process = %self.name, "stale retry timer ignored");
            return;
        }
        tracing::info!(process = %self.name, "retrying");
        self.slots[self.ap].error_until = None;
        self.advance(cx);
    }

    /// Terminating drive: tear down the tail. Returns true when nothing is
    /// left alive.
    fn retreat(&mut self) -> bool {
        if self.fp == 0 {
            return true;
        }

        let i = self.fp - 1;
        if self.slots[i].state != SlotState::Dying {
            tracing::info!(process = %self.name, statement = i, "killing");
            self.order_die(i);
            if self.ap > i {
                self.ap = i;
            }
        }
        self.assert_pointers();
        false
    }

    fn order_die(&mut self, i: usize) {
        if let Some(instance) = self.slots[i].instance.as_mut() {
            instance.die();
        }
        self.slots[i].state = SlotState::Dying;
    }

    fn set_error<C: Clock>(&mut self, cx: &EngineCx<C>, i: usize) {
        debug_assert_eq!(self.slots[i].state, SlotState::Forgotten);
        self.slots[i].error_until = Some(cx.clock.now() + cx.retry_time);
    }

    /// An up/down/dying event from the slot's current instance. Returns true
    /// when the process finished retreating as a result.
    pub(crate) fn handle_event<C: Clock>(
        &mut self,
        cx: &mut EngineCx<C>,
        i: usize,
        event: InstanceEvent,
    ) -> bool {
        let Some(slot) = self.slots.get_mut(i) else {
            tracing::error!(process = %self.name, statement = i, "event for out-of-range slot");
            return false;
        };

        match event {
            InstanceEvent::Up => {
                if slot.state != SlotState::Child {
                    tracing::debug!(
                        process = %self.name, statement = i, state = %slot.state,
                        "ignoring up"
                    );
                    return false;
                }
                slot.state = SlotState::Adult;
                tracing::info!(process = %self.name, statement = i, "up");
            }
            InstanceEvent::Down => {
                if slot.state != SlotState::Adult {
                    tracing::debug!(
                        process = %self.name, statement = i, state = %slot.state,
                        "ignoring down"
                    );
                    return false;
                }
                slot.state = SlotState::Child;
                tracing::info!(process = %self.name, statement = i, "down");
                if self.ap > i + 1 {
                    self.ap = i + 1;
                }
            }
            InstanceEvent::Dying => {
                if slot.state != SlotState::Child && slot.state != SlotState::Adult {
                    tracing::debug!(
                        process = %self.name, statement = i, state = %slot.state,
                        "ignoring dying"
                    );
                    return false;
                }
                slot.state = SlotState::Dying;
                tracing::info!(process = %self.name, statement = i, "dying");
                if self.ap > i {
                    self.ap = i;
                }
            }
        }

        self.work(cx)
    }

    /// The terminal died signal from the slot's current instance. Returns
    /// true when the process finished retreating as a result.
    pub(crate) fn handle_died<C: Clock>(
        &mut self,
        cx: &mut EngineCx<C>,
        i: usize,
        is_error: bool,
    ) -> bool {
        let Some(slot) = self.slots.get_mut(i) else {
            tracing::error!(process = %self.name, statement = i, "died for out-of-range slot");
            return false;
        };
        debug_assert_ne!(slot.state, SlotState::Forgotten);

        // Drop the instance together with its materialized arguments.
        slot.instance = None;
        if let Some(instance_id) = slot.instance_id.take() {
            cx.instances.remove(&instance_id);
        }
        slot.state = SlotState::Forgotten;
        if is_error {
            slot.error_until = Some(cx.clock.now() + cx.retry_time);
        } else {
            slot.error_until = None;
        }

        if self.ap > i {
            self.ap = i;
        }
        while self.fp > 0 && self.slots[self.fp - 1].state == SlotState::Forgotten {
            self.fp -= 1;
        }

        tracing::info!(process = %self.name, statement = i, "died");
        if is_error {
            tracing::error!(process = %self.name, statement = i, "with error");
        }

        self.work(cx)
    }

    /// Cursor invariants, re-checked after every externally observable step
    /// in debug builds.
    fn assert_pointers(&self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.ap <= self.slots.len());
            debug_assert!(self.ap <= self.fp && self.fp <= self.slots.len());

            for i in 0..self.ap {
                if i == self.ap - 1 {
                    debug_assert!(
                        self.slots[i].state == SlotState::Adult
                            || self.slots[i].state == SlotState::Child,
                        "slot {i} below ap must be adult or child"
                    );
                } else {
                    debug_assert!(
                        self.slots[i].state == SlotState::Adult,
                        "slot {i} below ap-1 must be adult"
                    );
                }
            }

            let mut fp = self.slots.len();
            while fp > 0 && self.slots[fp - 1].state == SlotState::Forgotten {
                fp -= 1;
            }
            debug_assert_eq!(self.fp, fp);

            for slot in &self.slots {
                debug_assert!(
                    slot.error_until.is_none() || slot.state == SlotState::Forgotten,
                    "error state only while forgotten"
                );
            }
        }
    }
}
