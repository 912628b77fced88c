// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifier type for tracking scheduled timers.

crate::define_id! {
    /// Unique identifier for a scheduled timer.
    pub struct TimerId;
}

impl TimerId {
    /// Retry-backoff timer for the process with the given key.
    pub fn retry(process_key: usize) -> Self {
        TimerKind::Retry { process_key }.to_timer_id()
    }

    /// Parse this timer ID into a typed `TimerKind`.
    pub fn kind(&self) -> Option<TimerKind> {
        TimerKind::parse(self.as_str())
    }
}

/// Parsed representation of a timer ID for type-safe routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Per-process retry backoff after a statement-level error.
    Retry { process_key: usize },
}

impl TimerKind {
    /// Parse a timer ID string, or `None` for unrecognized formats.
    pub fn parse(id: &str) -> Option<TimerKind> {
        let rest = id.strip_prefix("retry:")?;
        let process_key = rest.parse().ok()?;
        Some(TimerKind::Retry { process_key })
    }

    /// Format this `TimerKind` back into its canonical `TimerId`.
    pub fn to_timer_id(&self) -> TimerId {
        match self {
            TimerKind::Retry { process_key } => TimerId::new(format!("retry:{process_key}")),
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
