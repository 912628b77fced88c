// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The module capability contract.
//!
//! Instances report state changes by sending events on the supervisor's
//! channel; delivery always happens on a later loop turn, never from inside
//! `create`. Exactly one died event is delivered per instance — the emitter
//! latches once died has been sent and drops everything after it.

use crate::error::ModuleError;
use netup_core::{Event, InstanceId, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A pluggable statement behavior, identified by its type name.
pub trait Module: Send + Sync {
    /// Registered type name (e.g. `net.iface.up`).
    fn ty(&self) -> &'static str;

    /// One-time hook run at startup, before any process is created.
    fn global_init(&self) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Create an instance for one statement.
    ///
    /// On success the instance runs concurrently with the engine and will
    /// emit events through the context's emitter, ending with one died.
    fn create(&self, ctx: InstanceCtx) -> Result<Box<dyn ModuleInstance>, ModuleError>;
}

/// A live module instance owned by one statement slot.
pub trait ModuleInstance: Send {
    /// Order the instance to terminate. The instance eventually emits dying
    /// (if it has not already) followed by its died signal.
    fn die(&mut self);

    /// Resolve an exported variable. Only called while the statement is
    /// adult. The returned value is an owned copy.
    fn get_var(&self, name: &str) -> Option<Value>;
}

/// Everything a module needs to create an instance.
pub struct InstanceCtx {
    /// Exported alias from the statement, if any.
    pub alias: Option<String>,
    /// Materialized argument values, owned by the instance.
    pub args: Vec<Value>,
    /// Prefix for human-readable instance log lines.
    pub log_prefix: String,
    /// Event channel back into the supervisor.
    pub emitter: EventEmitter,
}

impl InstanceCtx {
    pub fn instance_id(&self) -> &InstanceId {
        self.emitter.instance_id()
    }
}

/// Sends instance lifecycle events into the supervisor loop.
///
/// Clones share the died latch, so no combination of tasks can deliver a
/// second terminal event.
#[derive(Clone)]
pub struct EventEmitter {
    instance: InstanceId,
    tx: mpsc::UnboundedSender<Event>,
    died: Arc<AtomicBool>,
}

impl EventEmitter {
    pub fn new(instance: InstanceId, tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { instance, tx, died: Arc::new(AtomicBool::new(false)) }
    }

    pub fn instance_id(&self) -> &InstanceId {
        &self.instance
    }

    pub fn up(&self) {
        self.send(Event::StmtUp { instance: self.instance.clone() });
    }

    pub fn down(&self) {
        self.send(Event::StmtDown { instance: self.instance.clone() });
    }

    pub fn dying(&self) {
        self.send(Event::StmtDying { instance: self.instance.clone() });
    }

    /// Emit the terminal died signal. First call wins; later lifecycle
    /// events from any clone are dropped.
    pub fn died(&self, is_error: bool) {
        if self.died.swap(true, Ordering::SeqCst) {
            tracing::debug!(instance = %self.instance, "duplicate died suppressed");
            return;
        }
        let event = Event::StmtDied { instance: self.instance.clone(), is_error };
        if self.tx.send(event).is_err() {
            tracing::debug!(instance = %self.instance, "event channel closed, dropping died");
        }
    }

    fn send(&self, event: Event) {
        if self.died.load(Ordering::SeqCst) {
            tracing::debug!(instance = %self.instance, event = event.name(), "event after died suppressed");
            return;
        }
        if self.tx.send(event).is_err() {
            tracing::debug!(instance = %self.instance, "event channel closed, dropping event");
        }
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
