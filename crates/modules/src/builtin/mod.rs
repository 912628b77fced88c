// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in modules.
//!
//! - `var` — immediately up; exports its argument value.
//! - `delay` — up after a configured number of milliseconds.
//! - `run` — one-shot command; up once it exits successfully.
//! - `daemon` — long-running command; up while it runs.

pub mod daemon;
pub mod delay;
pub mod run;
pub mod var;

use crate::error::ModuleError;
use netup_core::Value;

/// Interpret every argument as a string, for modules that exec commands.
pub(crate) fn string_args(args: &[Value], module: &str) -> Result<Vec<String>, ModuleError> {
    args.iter()
        .map(|v| match v.as_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(ModuleError::BadArgs(format!("{module}: expected string, got {}", v.type_name()))),
        })
        .collect()
}
