// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! netup-modules: pluggable statement behaviors.
//!
//! A module is a named capability the engine drives through a fixed
//! contract: create an instance, order it to die, resolve exported
//! variables, and receive up/down/dying events plus a final died signal
//! over the supervisor's event channel.

pub mod builtin;
pub mod error;
pub mod instance;
pub mod registry;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::ModuleError;
pub use instance::{EventEmitter, InstanceCtx, Module, ModuleInstance};
pub use registry::ModuleRegistry;
