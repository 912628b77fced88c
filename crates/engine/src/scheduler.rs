// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polled timer collection.
//!
//! Timers are absolute deadlines keyed by [`TimerId`]. The supervisor loop
//! sleeps until [`Scheduler::next_deadline`] and collects due timers with
//! [`Scheduler::fired_timers`]; tests drive the same surface with a fake
//! clock.

use netup_core::{Event, TimerId};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Default)]
pub struct Scheduler {
    timers: HashMap<TimerId, Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) a timer at an absolute deadline.
    pub fn set_timer_at(&mut self, id: TimerId, deadline: Instant) {
        self.timers.insert(id, deadline);
    }

    /// Disarm a timer. Disarming an unknown timer is a no-op.
    pub fn cancel_timer(&mut self, id: &TimerId) {
        self.timers.remove(id);
    }

    pub fn is_armed(&self, id: &TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Earliest armed deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().min().copied()
    }

    /// Remove every timer due at `now` and return its fired event, in
    /// deadline order.
    pub fn fired_timers(&mut self, now: Instant) -> Vec<Event> {
        let mut due: Vec<(TimerId, Instant)> =
            self.timers.iter().filter(|(_, d)| **d <= now).map(|(id, d)| (id.clone(), *d)).collect();
        due.sort_by_key(|(_, deadline)| *deadline);
        for (id, _) in &due {
            self.timers.remove(id);
        }
        due.into_iter().map(|(id, _)| Event::TimerFired { id }).collect()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
