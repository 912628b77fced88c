// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger setup: level words, per-channel filtering, stdout and syslog sinks.
//!
//! Channels map onto `tracing` targets, so `--channel-loglevel
//! netup_engine debug` turns the engine's channel up without touching the
//! rest. The six level words map onto tracing's five filters plus off.

use crate::args::{Args, LoggerKind};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log level surface: numeric 0-5 or a level word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    None,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

netup_core::simple_display! {
    Level {
        None => "none",
        Error => "error",
        Warning => "warning",
        Notice => "notice",
        Info => "info",
        Debug => "debug",
    }
}

impl Level {
    /// Parse `0-5` or `none|error|warning|notice|info|debug`.
    pub fn parse(s: &str) -> Result<Level, String> {
        match s {
            "0" | "none" => Ok(Level::None),
            "1" | "error" => Ok(Level::Error),
            "2" | "warning" => Ok(Level::Warning),
            "3" | "notice" => Ok(Level::Notice),
            "4" | "info" => Ok(Level::Info),
            "5" | "debug" => Ok(Level::Debug),
            other => Err(format!(
                "invalid log level '{other}' (expected 0-5 or none|error|warning|notice|info|debug)"
            )),
        }
    }

    /// The tracing filter directive this level maps to.
    pub fn directive(self) -> &'static str {
        match self {
            Level::None => "off",
            Level::Error => "error",
            Level::Warning => "warn",
            Level::Notice => "info",
            Level::Info => "debug",
            Level::Debug => "trace",
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("{0}")]
    InvalidLevel(String),

    #[error("invalid syslog facility '{0}'")]
    InvalidFacility(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("failed to set logger: {0}")]
    Subscriber(String),

    #[error("syslog logger is not supported on this platform")]
    SyslogUnsupported,

    #[error("failed to open syslog socket: {0}")]
    Syslog(#[from] std::io::Error),
}

/// Build the `EnvFilter` directive string from the default level and the
/// per-channel overrides.
pub fn filter_directives(default: Level, channels: &[(String, Level)]) -> String {
    let mut directives = vec![default.directive().to_string()];
    for (channel, level) in channels {
        directives.push(format!("{}={}", channel, level.directive()));
    }
    directives.join(",")
}

/// Initialize the global logger from the CLI arguments.
pub fn init(args: &Args) -> Result<(), LoggingError> {
    let default = args.loglevel.unwrap_or(Level::Notice);
    let channels = args.channel_levels().map_err(LoggingError::InvalidLevel)?;
    let filter = EnvFilter::try_new(filter_directives(default, &channels))
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    match args.logger {
        LoggerKind::Stdout => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| LoggingError::Subscriber(e.to_string())),
        LoggerKind::Syslog => init_syslog(args, filter),
    }
}

#[cfg(unix)]
fn init_syslog(args: &Args, filter: EnvFilter) -> Result<(), LoggingError> {
    let facility = syslog::facility_code(&args.syslog_facility)
        .ok_or_else(|| LoggingError::InvalidFacility(args.syslog_facility.clone()))?;
    let ident = args.syslog_ident.clone().unwrap_or_else(|| "netupd".to_string());
    let writer = syslog::SyslogWriter::connect(facility, ident)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))
}

#[cfg(not(unix))]
fn init_syslog(_args: &Args, _filter: EnvFilter) -> Result<(), LoggingError> {
    Err(LoggingError::SyslogUnsupported)
}

/// Minimal RFC 3164 sink over the local `/dev/log` datagram socket.
///
/// No pack dependency covers syslog, so the writer is built directly on the
/// standard library socket. Each formatted log line is sent as one datagram
/// with the priority derived from the record's level.
#[cfg(unix)]
pub mod syslog {
    use std::io::{self, Write};
    use std::os::unix::net::UnixDatagram;
    use std::sync::Arc;
    use tracing::Metadata;
    use tracing_subscriber::fmt::MakeWriter;

    const SYSLOG_PATH: &str = "/dev/log";

    /// RFC 3164 facility code for a facility name.
    pub fn facility_code(name: &str) -> Option<u8> {
        let code = match name {
            "kern" => 0,
            "user" => 1,
            "mail" => 2,
            "daemon" => 3,
            "auth" => 4,
            "syslog" => 5,
            "lpr" => 6,
            "news" => 7,
            "uucp" => 8,
            "cron" => 9,
            "authpriv" => 10,
            "ftp" => 11,
            "local0" => 16,
            "local1" => 17,
            "local2" => 18,
            "local3" => 19,
            "local4" => 20,
            "local5" => 21,
            "local6" => 22,
            "local7" => 23,
            _ => return None,
        };
        Some(code)
    }

    fn severity(meta: &Metadata<'_>) -> u8 {
        match *meta.level() {
            tracing::Level::ERROR => 3,
            tracing::Level::WARN => 4,
            tracing::Level::INFO => 6,
            tracing::Level::DEBUG | tracing::Level::TRACE => 7,
        }
    }

    #[derive(Clone)]
    pub struct SyslogWriter {
        socket: Arc<UnixDatagram>,
        ident: Arc<str>,
        facility: u8,
    }

    impl SyslogWriter {
        pub fn connect(facility: u8, ident: String) -> io::Result<Self> {
            let socket = UnixDatagram::unbound()?;
            socket.connect(SYSLOG_PATH)?;
            Ok(Self { socket: Arc::new(socket), ident: ident.into(), facility })
        }

        fn line(&self, severity: u8) -> SyslogLine {
            SyslogLine {
                socket: self.socket.clone(),
                ident: self.ident.clone(),
                priority: self.facility * 8 + severity,
                buf: Vec::new(),
            }
        }
    }

    impl<'a> MakeWriter<'a> for SyslogWriter {
        type Writer = SyslogLine;

        fn make_writer(&'a self) -> Self::Writer {
            self.line(6)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            self.line(severity(meta))
        }
    }

    /// One buffered log record, sent as a datagram on flush/drop.
    pub struct SyslogLine {
        socket: Arc<UnixDatagram>,
        ident: Arc<str>,
        priority: u8,
        buf: Vec<u8>,
    }

    impl Write for SyslogLine {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if self.buf.is_empty() {
                return Ok(());
            }
            let message = String::from_utf8_lossy(&self.buf);
            let datagram =
                format!("<{}>{}: {}", self.priority, self.ident, message.trim_end_matches('\n'));
            self.buf.clear();
            self.socket.send(datagram.as_bytes()).map(|_| ())
        }
    }

    impl Drop for SyslogLine {
        fn drop(&mut self) {
            let _ = self.flush();
        }
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
