// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `delay` — reports up after a configured number of milliseconds.

use crate::error::ModuleError;
use crate::instance::{EventEmitter, InstanceCtx, Module, ModuleInstance};
use netup_core::Value;
use std::time::Duration;

pub struct DelayModule;

impl Module for DelayModule {
    fn ty(&self) -> &'static str {
        "delay"
    }

    fn create(&self, ctx: InstanceCtx) -> Result<Box<dyn ModuleInstance>, ModuleError> {
        let ms = match ctx.args.as_slice() {
            [value] => value
                .as_str()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| ModuleError::BadArgs("delay: expected milliseconds".into()))?,
            _ => return Err(ModuleError::BadArgs("delay: expected exactly one argument".into())),
        };

        let emitter = ctx.emitter.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            emitter.up();
        });

        Ok(Box::new(DelayInstance { emitter: ctx.emitter, task }))
    }
}

struct DelayInstance {
    emitter: EventEmitter,
    task: tokio::task::JoinHandle<()>,
}

impl ModuleInstance for DelayInstance {
    fn die(&mut self) {
        self.task.abort();
        self.emitter.dying();
        self.emitter.died(false);
    }

    fn get_var(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl Drop for DelayInstance {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "delay_tests.rs"]
mod tests;
