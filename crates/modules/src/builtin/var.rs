// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `var` — holds a value and exports it.
//!
//! Reports up immediately. `get_var("")` resolves to a copy of the held
//! value: the single argument, or the list of arguments when more than one
//! was given.

use crate::error::ModuleError;
use crate::instance::{EventEmitter, InstanceCtx, Module, ModuleInstance};
use netup_core::Value;

pub struct VarModule;

impl Module for VarModule {
    fn ty(&self) -> &'static str {
        "var"
    }

    fn create(&self, ctx: InstanceCtx) -> Result<Box<dyn ModuleInstance>, ModuleError> {
        let InstanceCtx { mut args, emitter, .. } = ctx;
        let value = match args.len() {
            0 => return Err(ModuleError::BadArgs("var: expected at least one argument".into())),
            1 => match args.pop() {
                Some(v) => v,
                None => return Err(ModuleError::BadArgs("var: expected at least one argument".into())),
            },
            _ => Value::List(args),
        };
        emitter.up();
        Ok(Box::new(VarInstance { value, emitter }))
    }
}

struct VarInstance {
    value: Value,
    emitter: EventEmitter,
}

impl ModuleInstance for VarInstance {
    fn die(&mut self) {
        self.emitter.dying();
        self.emitter.died(false);
    }

    fn get_var(&self, name: &str) -> Option<Value> {
        if name.is_empty() {
            Some(self.value.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "var_tests.rs"]
mod tests;
