// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! netup-engine: the process supervisor engine.
//!
//! A [`supervisor::Supervisor`] owns a set of processes, each an ordered
//! array of statement slots driven by a two-cursor state machine: statements
//! are brought up in order, dependents are torn down tail-first whenever a
//! statement below them goes down or dies, and everything unwinds in
//! reverse on shutdown.

pub mod error;
pub mod process;
pub mod scheduler;
pub mod statement;
pub mod supervisor;

pub use error::{ConfigError, StatementError};
pub use process::SlotState;
pub use scheduler::Scheduler;
pub use supervisor::{EngineConfig, ProcessSnapshot, Supervisor, DEFAULT_RETRY_TIME};
