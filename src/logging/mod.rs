//! Log sink selection
//!
//! Foreground runs log to the console: errors to stderr, everything else to
//! stdout. Daemon runs log to the systemd journal under the `watchsync`
//! identifier, or to syslog through the local socket on hosts without a
//! journal. A detached daemon must reach one of them, since its standard
//! streams point at `/dev/null`.
//!
//! Verbosity comes from `-v` flags unless `RUST_LOG` is set.

mod syslog;

use std::path::Path;

use is_terminal::IsTerminal;
use tracing::{warn, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{WatchSyncError, WatchSyncResult};

pub use syslog::{find_socket, Syslog, SYSLOG_SOCKETS};

/// Identifier records carry in the journal.
pub const SYSLOG_IDENTIFIER: &str = "watchsync";

/// Where the caller wants records to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Console,
    /// Journal, then syslog; the console only when `console_fallback` is set
    SystemLog { console_fallback: bool },
}

/// Where records actually go once [`init`] succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Console,
    Journal,
    Syslog,
}

/// Install the global subscriber. Call once, before any job starts.
pub fn init(sink: LogSink, verbosity: u8) -> WatchSyncResult<Backend> {
    match sink {
        LogSink::Console => init_console(verbosity).map(|()| Backend::Console),
        LogSink::SystemLog { console_fallback } => init_system_log(verbosity, console_fallback),
    }
}

/// First reachable backend in preference order, if any is allowed.
pub fn select_backend(journal: bool, syslog: bool, console_fallback: bool) -> Option<Backend> {
    if journal {
        Some(Backend::Journal)
    } else if syslog {
        Some(Backend::Syslog)
    } else if console_fallback {
        Some(Backend::Console)
    } else {
        None
    }
}

fn init_system_log(verbosity: u8, console_fallback: bool) -> WatchSyncResult<Backend> {
    let journal = tracing_journald::layer();
    let socket = find_socket(SYSLOG_SOCKETS.iter().copied().map(Path::new));

    let backend = select_backend(journal.is_ok(), socket.is_some(), console_fallback)
        .ok_or_else(|| {
            WatchSyncError::Logging(format!(
                "no system log reachable (no journal, no syslog socket at {})",
                SYSLOG_SOCKETS.join(", ")
            ))
        })?;

    match (backend, journal) {
        (Backend::Journal, Ok(layer)) => tracing_subscriber::registry()
            .with(env_filter(verbosity))
            .with(layer.with_syslog_identifier(SYSLOG_IDENTIFIER.to_string()))
            .try_init()
            .map_err(|e| WatchSyncError::Logging(e.to_string()))?,
        (Backend::Syslog, _) => init_syslog(verbosity)?,
        _ => {
            init_console(verbosity)?;
            warn!("no system log reachable, logging to console");
        }
    }
    Ok(backend)
}

fn init_syslog(verbosity: u8) -> WatchSyncResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(Syslog)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .try_init()
        .map_err(|e| WatchSyncError::Logging(e.to_string()))
}

fn init_console(verbosity: u8) -> WatchSyncResult<()> {
    let writer = std::io::stderr
        .with_max_level(Level::ERROR)
        .or_else(std::io::stdout);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(writer)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| WatchSyncError::Logging(e.to_string()))
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
