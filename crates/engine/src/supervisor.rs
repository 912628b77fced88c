// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor: owns the processes, the terminating latch, and the loop.
//!
//! All state transitions run on one loop: instance events, timer firings,
//! and shutdown requests arrive on a single channel and are dispatched
//! synchronously, so every transition is atomic with respect to every
//! other. Events are addressed by instance ID; events from an instance
//! that is no longer registered (replaced or already died) are dropped.

use crate::error::ConfigError;
use crate::process::{InstanceEvent, Process, SlotState};
use crate::scheduler::Scheduler;
use netup_config::ProcessDecl;
use netup_core::{Clock, Event, InstanceId, TimerId, TimerKind};
use netup_modules::ModuleRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Default backoff applied after any statement-level error.
pub const DEFAULT_RETRY_TIME: Duration = Duration::from_millis(5000);

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Backoff applied after any statement-level error.
    pub retry_time: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { retry_time: DEFAULT_RETRY_TIME }
    }
}

/// Where an instance's events are routed: one slot of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StmtAddr {
    pub(crate) process: usize,
    pub(crate) slot: usize,
}

/// Shared engine context handed to process state machines.
pub(crate) struct EngineCx<C: Clock> {
    pub(crate) clock: C,
    pub(crate) scheduler: Scheduler,
    pub(crate) tx: mpsc::UnboundedSender<Event>,
    /// Live instance → slot routing table.
    pub(crate) instances: HashMap<InstanceId, StmtAddr>,
    pub(crate) registry: Arc<ModuleRegistry>,
    pub(crate) terminating: bool,
    pub(crate) retry_time: Duration,
}

/// Read-only view of one process for diagnostics and tests.
#[derive(Debug, Clone)]
pub struct ProcessSnapshot {
    pub name: String,
    pub ap: usize,
    pub fp: usize,
    pub states: Vec<SlotState>,
    pub retry_armed: bool,
}

pub struct Supervisor<C: Clock> {
    cx: EngineCx<C>,
    processes: HashMap<usize, Process>,
    /// Process keys in creation order.
    order: Vec<usize>,
    next_key: usize,
    rx: Option<mpsc::UnboundedReceiver<Event>>,
    quit: bool,
}

impl<C: Clock> Supervisor<C> {
    pub fn new(registry: Arc<ModuleRegistry>, clock: C, config: EngineConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            cx: EngineCx {
                clock,
                scheduler: Scheduler::new(),
                tx,
                instances: HashMap::new(),
                registry,
                terminating: false,
                retry_time: config.retry_time,
            },
            processes: HashMap::new(),
            order: Vec::new(),
            next_key: 0,
            rx: Some(rx),
            quit: false,
        }
    }

    /// A sender for feeding events into the loop from outside (signal
    /// handlers, tests).
    pub fn event_sender(&self) -> mpsc::UnboundedSender<Event> {
        self.cx.tx.clone()
    }

    /// Compile a process declaration, insert it, and run its first work
    /// cycle. Statements start coming up immediately; their events land on
    /// the channel for the next loop turn.
    pub fn add_process(&mut self, decl: &ProcessDecl) -> Result<(), ConfigError> {
        let key = self.next_key;
        let process = Process::new(key, decl, &self.cx.registry)?;
        self.next_key += 1;

        tracing::debug!(process = %decl.name, statements = decl.statements.len(), "process created");
        self.order.push(key);
        self.processes.insert(key, process);
        self.process_work(key);
        Ok(())
    }

    /// Request graceful shutdown. Idempotent: repeated requests are ignored.
    pub fn terminate(&mut self) {
        if self.cx.terminating {
            tracing::debug!("already terminating, ignoring request");
            return;
        }
        tracing::info!("tearing down");
        self.cx.terminating = true;

        if self.processes.is_empty() {
            self.quit = true;
            return;
        }
        for key in self.order.clone() {
            self.process_work(key);
        }
    }

    /// Dispatch one event synchronously.
    pub fn dispatch(&mut self, event: Event) {
        tracing::trace!(event = %event.log_summary(), "dispatch");
        match event {
            Event::ShutdownRequested => self.terminate(),
            Event::TimerFired { id } => self.timer_fired(id),
            Event::StmtUp { instance } => self.instance_event(&instance, InstanceEvent::Up),
            Event::StmtDown { instance } => self.instance_event(&instance, InstanceEvent::Down),
            Event::StmtDying { instance } => self.instance_event(&instance, InstanceEvent::Dying),
            Event::StmtDied { instance, is_error } => self.instance_died(&instance, is_error),
        }
    }

    /// Drain and dispatch every queued event without blocking.
    pub fn pump(&mut self) {
        let Some(mut rx) = self.rx.take() else {
            return;
        };
        while let Ok(event) = rx.try_recv() {
            self.dispatch(event);
        }
        self.rx = Some(rx);
    }

    /// Fire due timers against the current clock.
    pub fn poll_timers(&mut self) {
        let fired = self.cx.scheduler.fired_timers(self.cx.clock.now());
        for event in fired {
            self.dispatch(event);
        }
    }

    /// Run the supervisor loop until shutdown completes.
    pub async fn run(&mut self) {
        tracing::info!("entering event loop");
        let Some(mut rx) = self.rx.take() else {
            return;
        };
        while !self.quit {
            let deadline = self.cx.scheduler.next_deadline();
            tokio::select! {
                maybe = rx.recv() => match maybe {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                _ = sleep_until(deadline), if deadline.is_some() => self.poll_timers(),
            }
        }
        self.rx = Some(rx);
        tracing::info!("event loop finished");
    }

    /// True once shutdown has been requested and every process is gone.
    pub fn is_finished(&self) -> bool {
        self.quit
    }

    pub fn is_terminating(&self) -> bool {
        self.cx.terminating
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Per-process state views, in creation order.
    pub fn snapshot(&self) -> Vec<ProcessSnapshot> {
        self.order
            .iter()
            .filter_map(|key| self.processes.get(key).map(|p| (key, p)))
            .map(|(key, p)| ProcessSnapshot {
                name: p.name().to_string(),
                ap: p.ap(),
                fp: p.fp(),
                states: p.states(),
                retry_armed: self.cx.scheduler.is_armed(&TimerId::retry(*key)),
            })
            .collect()
    }

    // ---- dispatch targets ----

    fn instance_event(&mut self, instance: &InstanceId, event: InstanceEvent) {
        let Some(addr) = self.cx.instances.get(instance).copied() else {
            tracing::debug!(instance = %instance, "event for unknown instance, dropping");
            return;
        };
        let Some(process) = self.processes.get_mut(&addr.process) else {
            tracing::debug!(instance = %instance, "event for removed process, dropping");
            return;
        };
        let finished = process.handle_event(&mut self.cx, addr.slot, event);
        if finished {
            self.destroy_process(addr.process);
        }
    }

    fn instance_died(&mut self, instance: &InstanceId, is_error: bool) {
        let Some(addr) = self.cx.instances.get(instance).copied() else {
            tracing::debug!(instance = %instance, "died for unknown instance, dropping");
            return;
        };
        let Some(process) = self.processes.get_mut(&addr.process) else {
            tracing::debug!(instance = %instance, "died for removed process, dropping");
            return;
        };
        let finished = process.handle_died(&mut self.cx, addr.slot, is_error);
        if finished {
            self.destroy_process(addr.process);
        }
    }

    fn timer_fired(&mut self, id: TimerId) {
        match id.kind() {
            Some(TimerKind::Retry { process_key }) => {
                match self.processes.get_mut(&process_key) {
                    Some(process) => process.handle_retry_timer(&mut self.cx),
                    None => tracing::debug!(timer = %id, "timer for removed process, dropping"),
                }
            }
            None => tracing::debug!(timer = %id, "unrecognized timer, dropping"),
        }
    }

    fn process_work(&mut self, key: usize) {
        let Some(process) = self.processes.get_mut(&key) else {
            return;
        };
        let finished = process.work(&mut self.cx);
        if finished {
            self.destroy_process(key);
        }
    }

    fn destroy_process(&mut self, key: usize) {
        if let Some(process) = self.processes.remove(&key) {
            self.cx.scheduler.cancel_timer(&TimerId::retry(key));
            self.order.retain(|k| *k != key);
            tracing::info!(process = %process.name(), "process removed");
        }
        if self.processes.is_empty() && self.cx.terminating {
            self.quit = true;
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
