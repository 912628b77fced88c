// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `daemon` — long-running command.
//!
//! Spawns the argument vector and reports up while it runs. A spontaneous
//! exit — whatever the status — is a death with error, since the command
//! was expected to stay alive. Ordering death sends SIGTERM and reaps; a
//! command that ignores the signal is killed after a grace period.

use crate::builtin::string_args;
use crate::error::ModuleError;
use crate::instance::{EventEmitter, InstanceCtx, Module, ModuleInstance};
use netup_core::Value;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::oneshot;

#[cfg(unix)]
const KILL_GRACE: Duration = Duration::from_secs(10);

pub struct DaemonModule;

impl Module for DaemonModule {
    fn ty(&self) -> &'static str {
        "daemon"
    }

    fn create(&self, ctx: InstanceCtx) -> Result<Box<dyn ModuleInstance>, ModuleError> {
        let argv = string_args(&ctx.args, "daemon")?;
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| ModuleError::BadArgs("daemon: expected a command".into()))?;

        let mut command = Command::new(program);
        command.args(rest).kill_on_drop(true);
        let child = command
            .spawn()
            .map_err(|e| ModuleError::Init(format!("daemon: failed to spawn {program}: {e}")))?;

        ctx.emitter.up();
        let (die_tx, die_rx) = oneshot::channel();
        tokio::spawn(watch(child, die_rx, ctx.emitter.clone(), argv.join(" ")));
        Ok(Box::new(DaemonInstance { die_tx: Some(die_tx) }))
    }
}

async fn watch(
    mut child: Child,
    mut die_rx: oneshot::Receiver<()>,
    emitter: EventEmitter,
    cmdline: String,
) {
    tokio::select! {
        status = child.wait() => {
            match status {
                Ok(status) => {
                    tracing::error!(command = %cmdline, status = %status, "daemon exited unexpectedly");
                }
                Err(e) => {
                    tracing::error!(command = %cmdline, error = %e, "failed to reap daemon");
                }
            }
            emitter.dying();
            emitter.died(true);
        }
        _ = &mut die_rx => {
            emitter.dying();
            terminate(&mut child).await;
            emitter.died(false);
        }
    }
}

async fn terminate(child: &mut Child) {
    if graceful_stop(child).await {
        return;
    }
    let _ = child.start_kill();
    let _ = child.wait().await;
}

#[cfg(unix)]
async fn graceful_stop(child: &mut Child) -> bool {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        return false;
    };
    if kill(Pid::from_raw(pid as i32), Signal::SIGTERM).is_err() {
        return false;
    }
    match tokio::time::timeout(KILL_GRACE, child.wait()).await {
        Ok(_) => true,
        Err(_) => {
            tracing::warn!(pid, "daemon ignored SIGTERM, killing");
            false
        }
    }
}

#[cfg(not(unix))]
async fn graceful_stop(_child: &mut Child) -> bool {
    false
}

struct DaemonInstance {
    die_tx: Option<oneshot::Sender<()>>,
}

impl ModuleInstance for DaemonInstance {
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
#[path = "daemon_tests.rs"]
mod tests;
