// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments for netupd.

use crate::logging::Level;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Declarative network configuration supervisor.
#[derive(Debug, Parser)]
#[command(name = "netupd", version, about)]
pub struct Args {
    /// Log sink.
    #[arg(long, value_enum, default_value_t = LoggerKind::Stdout)]
    pub logger: LoggerKind,

    /// Syslog facility name (syslog logger only).
    #[arg(long, default_value = "daemon")]
    pub syslog_facility: String,

    /// Syslog program identifier (syslog logger only; defaults to netupd).
    #[arg(long)]
    pub syslog_ident: Option<String>,

    /// Default log level: 0-5 or none|error|warning|notice|info|debug.
    #[arg(long, value_parser = Level::parse)]
    pub loglevel: Option<Level>,

    /// Per-channel log level override; repeatable.
    #[arg(long, num_args = 2, value_names = ["CHANNEL", "LEVEL"], action = clap::ArgAction::Append)]
    pub channel_loglevel: Vec<String>,

    /// Configuration file.
    #[arg(long, required = true)]
    pub config_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoggerKind {
    Stdout,
    Syslog,
}

netup_core::simple_display! {
    LoggerKind {
        Stdout => "stdout",
        Syslog => "syslog",
    }
}

impl Args {
    /// The flattened `--channel-loglevel CHANNEL LEVEL` pairs, parsed.
    pub fn channel_levels(&self) -> Result<Vec<(String, Level)>, String> {
        self.channel_loglevel
            .chunks(2)
            .map(|pair| match pair {
                [channel, level] => Ok((channel.clone(), Level::parse(level)?)),
                _ => Err("--channel-loglevel requires two arguments".to_string()),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
