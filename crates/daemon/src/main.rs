// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! netupd: declarative network configuration supervisor daemon.
//!
//! Reads the configuration file, brings every process's statements up in
//! order, supervises them until a termination signal arrives, then tears
//! everything down in reverse and exits. The exit code is 1 on every path;
//! 0 is reserved for `--help` and `--version`.

use clap::Parser;
use netup_daemon::{logging, Args};
use netup_engine::{EngineConfig, Supervisor};
use netup_modules::ModuleRegistry;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to read config file: {0}")]
    ReadConfig(std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseConfig(netup_config::ParseError),

    #[error(transparent)]
    GlobalInit(#[from] netup_modules::ModuleError),

    #[error("failed to start runtime: {0}")]
    Runtime(std::io::Error),
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let helpish = matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            let _ = e.print();
            return if helpish { ExitCode::SUCCESS } else { ExitCode::FAILURE };
        }
    };

    if let Err(e) = logging::init(&args) {
        eprintln!("failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
    }
    tracing::info!("exiting");
    ExitCode::FAILURE
}

fn run(args: Args) -> Result<(), StartupError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "initializing netupd");

    let source = std::fs::read_to_string(&args.config_file).map_err(StartupError::ReadConfig)?;
    let document = netup_config::parse_document(&source).map_err(|e| {
        if let Some(diagnostic) = e.diagnostic(&source) {
            eprintln!("{diagnostic}");
        }
        StartupError::ParseConfig(e)
    })?;

    let registry = Arc::new(ModuleRegistry::builtin());
    registry.global_init_all()?;

    // Single-threaded runtime: every callback is serialized on one loop.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;

    runtime.block_on(async {
        let mut supervisor =
            Supervisor::new(registry, netup_core::SystemClock, EngineConfig::default());

        for decl in &document.processes {
            if let Err(e) = supervisor.add_process(decl) {
                tracing::error!(process = %decl.name, "{}", e);
            }
        }

        spawn_signal_task(supervisor.event_sender());
        supervisor.run().await;
    });

    Ok(())
}

/// Forward the first termination signal as a shutdown event; later signals
/// are swallowed (the supervisor's terminate is latched anyway).
#[cfg(unix)]
fn spawn_signal_task(tx: mpsc::UnboundedSender<netup_core::Event>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut term, mut int) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                _ => {
                    tracing::error!("failed to install signal handlers");
                    return;
                }
            };

        let mut requested = false;
        loop {
            tokio::select! {
                _ = term.recv() => {}
                _ = int.recv() => {}
            }
            if requested {
                tracing::debug!("already terminating, ignoring signal");
                continue;
            }
            requested = true;
            tracing::info!("termination requested");
            let _ = tx.send(netup_core::Event::ShutdownRequested);
        }
    });
}

#[cfg(not(unix))]
fn spawn_signal_task(tx: mpsc::UnboundedSender<netup_core::Event>) {
    tokio::spawn(async move {
        let mut requested = false;
        loop {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::error!("failed to install signal handler");
                return;
            }
            if requested {
                continue;
            }
            requested = true;
            tracing::info!("termination requested");
            let _ = tx.send(netup_core::Event::ShutdownRequested);
        }
    });
}
