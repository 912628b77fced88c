// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events delivered to the supervisor loop.
//!
//! Module instances, the timer scheduler, and the signal handler all
//! communicate with the supervisor through this one enum; the loop
//! serializes every delivery, so each event is an atomic state transition.

use crate::id::InstanceId;
use crate::timer::TimerId;
use serde::{Deserialize, Serialize};

/// Events that drive the per-process state machines.
///
/// Serializes with `{"type": "stmt:up", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Instance reports it is up; its statement becomes adult.
    #[serde(rename = "stmt:up")]
    StmtUp { instance: InstanceId },

    /// Instance reports it went back down; its statement becomes child.
    /// The instance itself stays alive.
    #[serde(rename = "stmt:down")]
    StmtDown { instance: InstanceId },

    /// Instance has begun dying. A `stmt:died` always follows.
    #[serde(rename = "stmt:dying")]
    StmtDying { instance: InstanceId },

    /// Terminal event for an instance; exactly one arrives per instance.
    #[serde(rename = "stmt:died")]
    StmtDied { instance: InstanceId, is_error: bool },

    /// A scheduler timer reached its deadline.
    #[serde(rename = "timer:fired")]
    TimerFired { id: TimerId },

    /// Graceful shutdown requested (signal delivery).
    #[serde(rename = "supervisor:shutdown")]
    ShutdownRequested,
}

impl Event {
    /// Event name for log spans (e.g., "stmt:up").
    pub fn name(&self) -> &'static str {
        match self {
            Event::StmtUp { .. } => "stmt:up",
            Event::StmtDown { .. } => "stmt:down",
            Event::StmtDying { .. } => "stmt:dying",
            Event::StmtDied { .. } => "stmt:died",
            Event::TimerFired { .. } => "timer:fired",
            Event::ShutdownRequested => "supervisor:shutdown",
        }
    }

    /// The emitting instance, for events that carry one.
    pub fn instance(&self) -> Option<&InstanceId> {
        match self {
            Event::StmtUp { instance }
            | Event::StmtDown { instance }
            | Event::StmtDying { instance }
            | Event::StmtDied { instance, .. } => Some(instance),
            Event::TimerFired { .. } | Event::ShutdownRequested => None,
        }
    }

    /// One-line summary for diagnostics.
    pub fn log_summary(&self) -> String {
        match self {
            Event::StmtDied { instance, is_error } => {
                format!("stmt:died instance={} is_error={}", instance, is_error)
            }
            Event::TimerFired { id } => format!("timer:fired id={}", id),
            Event::ShutdownRequested => "supervisor:shutdown".to_string(),
            other => match other.instance() {
                Some(instance) => format!("{} instance={}", other.name(), instance),
                None => other.name().to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
