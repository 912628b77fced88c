// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `run` — one-shot command.
//!
//! Spawns the argument vector as a command. Exit status 0 reports up and
//! the statement stays up; a nonzero exit or reap failure is a death with
//! error. Ordering death kills the command if it is still running.

use crate::builtin::string_args;
use crate::error::ModuleError;
use crate::instance::{EventEmitter, InstanceCtx, Module, ModuleInstance};
use netup_core::Value;
use tokio::process::{Child, Command};
use tokio::sync::oneshot;

pub struct RunModule;

impl Module for RunModule {
    fn ty(&self) -> &'static str {
        "run"
    }

    fn create(&self, ctx: InstanceCtx) -> Result<Box<dyn ModuleInstance>, ModuleError> {
        let argv = string_args(&ctx.args, "run")?;
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| ModuleError::BadArgs("run: expected a command".into()))?;

        let mut command = Command::new(program);
        command.args(rest).kill_on_drop(true);
        let child = command
            .spawn()
            .map_err(|e| ModuleError::Init(format!("run: failed to spawn {program}: {e}")))?;

        let (die_tx, die_rx) = oneshot::channel();
        tokio::spawn(watch(child, die_rx, ctx.emitter.clone(), argv.join(" ")));
        Ok(Box::new(RunInstance { die_tx: Some(die_tx) }))
    }
}

async fn watch(
    mut child: Child,
    mut die_rx: oneshot::Receiver<()>,
    emitter: EventEmitter,
    cmdline: String,
) {
    tokio::select! {
        status = child.wait() => match status {
            Ok(status) if status.success() => {
                emitter.up();
                // Stay up until ordered to die.
                let _ = die_rx.await;
                emitter.dying();
                emitter.died(false);
            }
            Ok(status) => {
                tracing::error!(command = %cmdline, status = %status, "command failed");
                emitter.dying();
                emitter.died(true);
            }
            Err(e) => {
                tracing::error!(command = %cmdline, error = %e, "failed to reap command");
                emitter.dying();
                emitter.died(true);
            }
        },
        _ = &mut die_rx => {
            emitter.dying();
            let _ = child.start_kill();
            let _ = child.wait().await;
            emitter.died(false);
        }
    }
}

struct RunInstance {
    die_tx: Option<oneshot::Sender<()>>,
}

impl ModuleInstance for RunInstance {
    fn die(&mut self) {
        if let Some(tx) = self.die_tx.take() {
            let _ = tx.send(());
        }
    }

    fn get_var(&self, _name: &str) -> Option<Value> {
        None
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
